use std::{fmt, sync::OnceLock};

use regex::Regex;

use super::{SignupInput, SignupVariant};

pub const MIN_PASSWORD_LEN: usize = 8;

// Optional '+', a non-zero leading digit then 7 to 14 more digits.
const MOBILE_PATTERN: &str = r"^\+?[1-9][0-9]{7,14}$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Email is required.")]
    EmailRequired,
    #[error("Password must be at least 8 characters.")]
    PasswordTooShort,
    #[error("Mobile is required.")]
    MobileRequired,
    #[error("Please enter a valid mobile number.")]
    InvalidMobile,
}

/// Form values that passed validation, ready to be sent.
#[derive(Clone, PartialEq, Eq)]
pub struct ValidSignup {
    pub email: String,
    pub password: String,
    /// Normalized, only set for the mobile variant.
    pub phone: Option<String>,
    pub business_name: Option<String>,
}

impl fmt::Debug for ValidSignup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidSignup")
            .field("email", &self.email)
            .field("password", &"REDACTED")
            .field("phone", &self.phone)
            .field("business_name", &self.business_name)
            .finish()
    }
}

fn mobile_regex() -> &'static Regex {
    static MOBILE: OnceLock<Regex> = OnceLock::new();
    MOBILE.get_or_init(|| Regex::new(MOBILE_PATTERN).expect("Mobile pattern is valid"))
}

/// Drop the whitespace and the `(`, `)` and `-` separators people type in phone numbers.
pub fn normalize_mobile(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '-'))
        .collect()
}

pub fn is_valid_mobile(normalized: &str) -> bool {
    mobile_regex().is_match(normalized)
}

/// Check the form, stopping at the first problem found. Only one error is ever reported.
pub fn validate(
    input: &SignupInput,
    variant: SignupVariant,
) -> Result<ValidSignup, ValidationError> {
    let email = input.email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }

    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }

    let phone = if variant.asks_mobile() {
        let mobile = input.mobile.trim();
        if mobile.is_empty() {
            return Err(ValidationError::MobileRequired);
        }
        let normalized = normalize_mobile(mobile);
        if !is_valid_mobile(&normalized) {
            return Err(ValidationError::InvalidMobile);
        }
        Some(normalized)
    } else {
        None
    };

    let business_name = Some(input.business_name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    Ok(ValidSignup {
        email: email.to_string(),
        password: input.password.clone(),
        phone,
        business_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(email: &str, password: &str, mobile: &str) -> SignupInput {
        SignupInput {
            email: email.to_string(),
            password: password.to_string(),
            mobile: mobile.to_string(),
            business_name: String::new(),
        }
    }

    #[test]
    fn email_is_required() {
        for email in ["", " ", "\t\n  "] {
            assert_eq!(
                validate(&input(email, "longenough", ""), SignupVariant::Basic),
                Err(ValidationError::EmailRequired)
            );
        }
        // Reported before the password
        assert_eq!(
            validate(&input("", "short", ""), SignupVariant::Mobile)
                .unwrap_err()
                .to_string(),
            "Email is required."
        );
    }

    #[test]
    fn password_length() {
        for password in ["", "1234567", "       "] {
            assert_eq!(
                validate(&input("billy@example.com", password, ""), SignupVariant::Basic),
                Err(ValidationError::PasswordTooShort)
            );
        }
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 8 characters."
        );
        // The password is not trimmed
        let valid = validate(&input("billy@example.com", " 1234567", ""), SignupVariant::Basic)
            .unwrap();
        assert_eq!(valid.password, " 1234567");
        // Counted in characters, not bytes
        assert_eq!(
            validate(&input("billy@example.com", "éééé", ""), SignupVariant::Basic),
            Err(ValidationError::PasswordTooShort)
        );
    }

    #[test]
    fn mobile_required_only_for_mobile_variant() {
        assert_eq!(
            validate(&input("billy@example.com", "longenough", "  "), SignupVariant::Mobile),
            Err(ValidationError::MobileRequired)
        );
        let valid =
            validate(&input("billy@example.com", "longenough", "  "), SignupVariant::Basic)
                .unwrap();
        assert_eq!(valid.phone, None);
        // Ignored altogether in the basic variant, even if garbage
        let valid =
            validate(&input("billy@example.com", "longenough", "abc"), SignupVariant::Basic)
                .unwrap();
        assert_eq!(valid.phone, None);
    }

    #[test]
    fn mobile_format() {
        let check = |mobile: &str| {
            validate(&input("billy@example.com", "longenough", mobile), SignupVariant::Mobile)
        };

        // Leading zero is rejected once normalized
        assert_eq!(normalize_mobile("0400 111 222"), "0400111222");
        assert_eq!(check("0400 111 222"), Err(ValidationError::InvalidMobile));
        assert_eq!(
            ValidationError::InvalidMobile.to_string(),
            "Please enter a valid mobile number."
        );

        assert_eq!(check("+61400111222").unwrap().phone.as_deref(), Some("+61400111222"));
        assert_eq!(
            check(" +1 (415) 555-2671 ").unwrap().phone.as_deref(),
            Some("+14155552671")
        );
        assert_eq!(check("12345678").unwrap().phone.as_deref(), Some("12345678"));
        assert_eq!(
            check("123456789012345").unwrap().phone.as_deref(),
            Some("123456789012345")
        );

        for invalid in [
            "1234567",
            "1234567890123456",
            "++61400111222",
            "61400111222+",
            "+61.400.111.222",
            "+6140011122a",
            "+0400111222",
        ] {
            assert_eq!(check(invalid), Err(ValidationError::InvalidMobile), "{}", invalid);
        }
        // Only ASCII digits
        assert!(!is_valid_mobile("+٦١٤٠٠١١١٢٢٢"));
    }

    #[test]
    fn valid_signup() {
        let valid = validate(
            &SignupInput {
                email: "  billy@example.com ".to_string(),
                password: "longenough".to_string(),
                mobile: "+61 400 111 222".to_string(),
                business_name: "  Billy's Plumbing ".to_string(),
            },
            SignupVariant::Mobile,
        )
        .unwrap();
        assert_eq!(valid.email, "billy@example.com");
        assert_eq!(valid.phone.as_deref(), Some("+61400111222"));
        assert_eq!(valid.business_name.as_deref(), Some("Billy's Plumbing"));
        assert!(!format!("{:?}", valid).contains("longenough"));

        // A blank business name is not provided
        let valid = validate(
            &SignupInput {
                business_name: "   ".to_string(),
                ..input("billy@example.com", "longenough", "")
            },
            SignupVariant::Basic,
        )
        .unwrap();
        assert_eq!(valid.business_name, None);
    }
}
