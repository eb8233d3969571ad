//! Login and logout commands

use colored::Colorize;

use crate::cli::args::{LoginArgs, OutputFormat};
use crate::context::Context;
use crate::error::Result;

/// Handle the login command
pub fn login(ctx: &Context, args: &LoginArgs, format: OutputFormat) -> Result<String> {
    let sid = match &args.sid {
        Some(sid) => sid.clone(),
        None => rpassword::prompt_password("Session id (wps_sid cookie): ")?,
    };
    ctx.login(&sid)?;

    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} Session saved to: {}",
            "✓".green(),
            ctx.paths.credentials_file.display()
        )),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "success": true,
                "credentials": ctx.paths.credentials_file.display().to_string(),
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

/// Handle the logout command
pub fn logout(ctx: &Context, format: OutputFormat) -> Result<String> {
    ctx.logout()?;

    match format {
        OutputFormat::Pretty => Ok(format!("{} Logged out, cache cleared", "✓".green())),
        OutputFormat::Json => {
            let result = serde_json::json!({
                "status": "logged_out"
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}
