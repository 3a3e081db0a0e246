use iced::{
    widget::{button, container, text, text_input, Column, TextInput},
    Alignment, Element, Length,
};

use super::{App, Message, Page, ViewMessage};

fn field<'a>(
    placeholder: &str,
    value: &str,
    on_input: fn(String) -> ViewMessage,
    enabled: bool,
) -> TextInput<'a, ViewMessage> {
    let input = text_input(placeholder, value).padding(10).size(16);
    if enabled {
        input.on_input(on_input).on_submit(ViewMessage::Submit)
    } else {
        input
    }
}

impl App {
    pub fn view(&self) -> Element<Message> {
        let content: Element<ViewMessage> = match self.page {
            Page::Signup => self.signup_view(),
            Page::CheckEmail => self.check_email_view(),
            Page::AccountSetup => account_setup_view(),
        };

        container(content.map(Message::View))
            .padding(40)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn signup_view(&self) -> Element<ViewMessage> {
        let enabled = !self.submission.is_submitting();
        Column::new()
            .spacing(20)
            .max_width(420)
            .push(text("Create your BillyBot account").size(28))
            .push(field("Email", &self.form.email, ViewMessage::EmailEdited, enabled))
            .push(
                field(
                    "Password (8 characters minimum)",
                    &self.form.password,
                    ViewMessage::PasswordEdited,
                    enabled,
                )
                .secure(true),
            )
            .push_maybe(self.flow.variant().asks_mobile().then(|| {
                field("Mobile", &self.form.mobile, ViewMessage::MobileEdited, enabled)
            }))
            .push(field(
                "Business name (optional)",
                &self.form.business_name,
                ViewMessage::BusinessNameEdited,
                enabled,
            ))
            .push_maybe(
                self.submission
                    .error()
                    .map(|e| text(e.to_string()).style(text::danger)),
            )
            .push(
                button(text(if enabled {
                    "Create account"
                } else {
                    "Creating account..."
                }))
                .padding(10)
                .width(Length::Fill)
                .on_press_maybe(enabled.then_some(ViewMessage::Submit)),
            )
            .into()
    }

    fn check_email_view(&self) -> Element<ViewMessage> {
        Column::new()
            .spacing(20)
            .max_width(420)
            .align_x(Alignment::Center)
            .push(text("Check your email").size(28))
            .push(text(format!(
                "We sent a confirmation link to {}. Follow it to activate your account.",
                self.email
            )))
            .push_maybe(
                self.resend
                    .sent
                    .then(|| text("Confirmation email sent again.").style(text::success)),
            )
            .push_maybe(
                self.resend
                    .error
                    .as_ref()
                    .map(|e| text(e.to_string()).style(text::danger)),
            )
            .push(
                button(text("Resend confirmation email"))
                    .padding(10)
                    .style(button::secondary)
                    .on_press_maybe(
                        (!self.resend.processing).then_some(ViewMessage::ResendConfirmation),
                    ),
            )
            .push(
                button(text("Back to signup"))
                    .padding(10)
                    .style(button::text)
                    .on_press(ViewMessage::BackToSignup),
            )
            .into()
    }
}

fn account_setup_view<'a>() -> Element<'a, ViewMessage> {
    Column::new()
        .spacing(20)
        .max_width(420)
        .align_x(Alignment::Center)
        .push(text("Welcome to BillyBot").size(28))
        .push(text("Your account is ready. Let's set up your business."))
        .into()
}
