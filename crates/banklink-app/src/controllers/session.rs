//! Logout

use super::ControllerContext;
use crate::forms::SubmitOutcome;

pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

#[derive(Debug, Default)]
pub struct LogoutController;

impl LogoutController {
    pub fn logout(&self, ctx: &ControllerContext) -> SubmitOutcome {
        match ctx.session.end() {
            Ok(()) => {
                ctx.notify_success(LOGGED_OUT_MESSAGE);
                SubmitOutcome::Succeeded(LOGGED_OUT_MESSAGE.to_string())
            }
            Err(e) => {
                log::error!("Could not clear session: {}", e);
                let message = e.to_string();
                ctx.notify_error(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
