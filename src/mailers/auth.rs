// auth mailer
#![allow(non_upper_case_globals)]

use loco_rs::prelude::*;
use serde_json::json;

use crate::common::settings::Settings;
use crate::models::users;

static confirm: Dir<'_> = include_dir!("src/mailers/auth/confirm");
static reset: Dir<'_> = include_dir!("src/mailers/auth/reset");

#[allow(clippy::module_name_repetitions)]
pub struct AuthMailer {}
impl Mailer for AuthMailer {}

impl AuthMailer {
    /// Renders and queues the account-confirmation mail. Delivery happens on
    /// the worker queue; the caller returns before any SMTP work starts, and
    /// delivery failures stay with the queue.
    ///
    /// # Errors
    ///
    /// When the mail cannot be rendered or enqueued.
    pub async fn send_confirm_email(ctx: &AppContext, user: &users::Model) -> Result<()> {
        let settings = Settings::from_context(ctx);
        Self::mail_template(
            ctx,
            &confirm,
            mailer::Args {
                to: user.email.to_string(),
                locals: json!({
                    "name": user.name,
                    "token": user.email_verification_token,
                    "host": ctx.config.server.host,
                    "subjectPrefix": settings.mail_subject_prefix,
                }),
                ..Default::default()
            },
        )
        .await?;

        Ok(())
    }

    /// Renders and queues the password-reset mail.
    ///
    /// # Errors
    ///
    /// When the mail cannot be rendered or enqueued.
    pub async fn send_reset_password_email(ctx: &AppContext, user: &users::Model) -> Result<()> {
        let settings = Settings::from_context(ctx);
        Self::mail_template(
            ctx,
            &reset,
            mailer::Args {
                to: user.email.to_string(),
                locals: json!({
                    "name": user.name,
                    "token": user.reset_token,
                    "host": ctx.config.server.host,
                    "subjectPrefix": settings.mail_subject_prefix,
                }),
                ..Default::default()
            },
        )
        .await?;

        Ok(())
    }
}
