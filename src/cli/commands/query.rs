//! The launcher entry point
//!
//! Every keystroke in the launcher runs `kdocs query <text>`. The text picks
//! the listing; navigation ids carried over from the previous selection
//! arrive as options or environment variables.

use tracing::debug;

use crate::cli::args::{OutputFormat, QueryArgs};
use crate::context::{Context, Invocation};
use crate::error::{KdocsError, Result};
use crate::kdocs::LatestFile;
use crate::listing::display_path;
use crate::output::{self, items, Feedback};

/// What a query text asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Logout,
    Recent,
    Groups,
    Folder(&'a str),
    Search(&'a str),
}

impl<'a> Route<'a> {
    pub fn parse(text: &'a str) -> Self {
        match text {
            "logout" => Self::Logout,
            "" => Self::Recent,
            path if path.starts_with('/') => match path.trim_end_matches('/') {
                "" => Self::Groups,
                folder => Self::Folder(folder),
            },
            keyword => Self::Search(keyword),
        }
    }
}

/// Handle the query command
pub fn query(ctx: &Context, args: &QueryArgs, format: OutputFormat) -> Result<String> {
    let invocation = Invocation {
        query: args.text.clone(),
        group_id: args.group_id.clone(),
        file_id: args.file_id.clone(),
        parent_file_id: args.parent_file_id.clone(),
        wps_cache_dir: args.cache_dir.clone(),
        ..Invocation::default()
    }
    .with_env_overrides();

    let feedback = answer(ctx, &invocation);
    output::format_feedback(&feedback, format)
}

/// Build the launcher feedback for one invocation
///
/// Never fails: anything that goes wrong becomes a notice.
pub fn answer(ctx: &Context, invocation: &Invocation) -> Feedback {
    match try_answer(ctx, invocation) {
        Ok(feedback) => feedback,
        Err(KdocsError::AuthMissing) => auth_notice(),
        Err(e) => Feedback::notice("Query failed", e.to_string()),
    }
}

fn auth_notice() -> Feedback {
    Feedback::notice("Not logged in", "Type your wps_sid to log in")
}

fn try_answer(ctx: &Context, invocation: &Invocation) -> Result<Feedback> {
    let route = Route::parse(&invocation.query);
    debug!(?route, "dispatching query");

    if route == Route::Logout {
        ctx.logout()?;
        return Ok(Feedback::notice("Logged out", "Session and cached listings removed"));
    }

    if !ctx.is_logged_in()? {
        if invocation.query.trim().is_empty() {
            return Ok(auth_notice());
        }
        ctx.login(&invocation.query)?;
        return recent(ctx, invocation);
    }

    match route {
        Route::Recent => recent(ctx, invocation),
        Route::Groups => groups(ctx, invocation),
        Route::Folder(path) => folder(ctx, invocation, path),
        Route::Search(keyword) => search(ctx, invocation, keyword),
        Route::Logout => unreachable!(), // Handled above
    }
}

fn recent(ctx: &Context, invocation: &Invocation) -> Result<Feedback> {
    let listings = ctx.listings(invocation);
    let loc = ctx.locations(invocation);
    let fetched = listings.recent()?;

    let local_copy = |file: &LatestFile| {
        if loc.cache_dir.is_empty() {
            return String::new();
        }
        match listings.file_path(file.group_id, &file.file_id) {
            Ok(path) if !path.data.is_empty() => {
                format!("{}{}", loc.cache_dir, display_path(&path.data))
            }
            Ok(_) => String::new(),
            Err(e) => {
                debug!(file_id = %file.file_id, error = %e, "no local path");
                String::new()
            }
        }
    };

    let rows = items::recent(&fetched.data, &loc, local_copy);
    Ok(items::feedback(&fetched, rows))
}

fn search(ctx: &Context, invocation: &Invocation, keyword: &str) -> Result<Feedback> {
    let fetched = ctx.listings(invocation).search(keyword)?;
    let rows = items::search(&fetched.data, &ctx.locations(invocation));
    Ok(items::feedback(&fetched, rows))
}

fn groups(ctx: &Context, invocation: &Invocation) -> Result<Feedback> {
    let fetched = ctx.listings(invocation).groups()?;
    let rows = items::groups(&fetched.data, &ctx.locations(invocation));
    Ok(items::feedback(&fetched, rows))
}

fn folder(ctx: &Context, invocation: &Invocation, path: &str) -> Result<Feedback> {
    let fetched = ctx.listings(invocation).folder(
        path,
        invocation.group_id.as_deref(),
        invocation.file_id.as_deref(),
        invocation.parent_file_id.as_deref(),
    )?;
    let rows = items::folder(&fetched.data, &ctx.locations(invocation));
    Ok(items::feedback(&fetched, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Paths};
    use crate::listing::testing::{file, latest, FakeApi};
    use crate::secret::{MemorySecretStore, SecretStore, SESSION_KEY};
    use tempfile::TempDir;

    fn context(tmp: &TempDir, secrets: MemorySecretStore, api: FakeApi) -> Context {
        Context::new(
            Paths::with_root(tmp.path()),
            Config::default(),
            Box::new(secrets),
            Box::new(api),
        )
    }

    fn titles(feedback: &Feedback) -> Vec<&str> {
        feedback.items.iter().map(|item| item.title.as_str()).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Route Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse(""), Route::Recent);
        assert_eq!(Route::parse("/"), Route::Groups);
        assert_eq!(Route::parse("//"), Route::Groups);
        assert_eq!(Route::parse("/Team/"), Route::Folder("/Team"));
        assert_eq!(Route::parse("/Team/Specs"), Route::Folder("/Team/Specs"));
        assert_eq!(Route::parse("budget"), Route::Search("budget"));
        assert_eq!(Route::parse("logout"), Route::Logout);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_query_without_session_asks_for_login() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp, MemorySecretStore::new(), FakeApi::default());

        let feedback = answer(&ctx, &Invocation::new(""));

        assert_eq!(titles(&feedback), vec!["Not logged in"]);
        assert!(!feedback.items[0].valid);
    }

    #[test]
    fn test_query_without_session_logs_in_and_lists_recent() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi {
            recent: vec![latest("1", "a.docx")],
            ..FakeApi::default()
        };
        let ctx = context(&tmp, MemorySecretStore::new(), api);

        let feedback = answer(&ctx, &Invocation::new("sid-123"));

        assert_eq!(
            ctx.secrets.get(SESSION_KEY).unwrap().as_deref(),
            Some("sid-123")
        );
        assert_eq!(titles(&feedback), vec!["Browse", "a.docx"]);
    }

    #[test]
    fn test_logout_query() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp, MemorySecretStore::with_session("sid"), FakeApi::default());

        let feedback = answer(&ctx, &Invocation::new("logout"));

        assert_eq!(titles(&feedback), vec!["Logged out"]);
        assert!(!ctx.is_logged_in().unwrap());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Listing Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_search_without_hits_shows_notice() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp, MemorySecretStore::with_session("sid"), FakeApi::default());

        let feedback = answer(&ctx, &Invocation::new("nothing-matches"));

        assert_eq!(titles(&feedback), vec!["No files found"]);
    }

    #[test]
    fn test_failed_refresh_prepends_notice() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi::default();
        api.fail.set(true);
        let ctx = context(&tmp, MemorySecretStore::with_session("sid"), api);

        let feedback = answer(&ctx, &Invocation::new("/"));

        assert_eq!(titles(&feedback), vec!["Query failed", "Recent"]);
    }

    #[test]
    fn test_folder_query_uses_invocation_ids() {
        let tmp = TempDir::new().unwrap();
        let api = FakeApi {
            children: vec![file(11, "x", "folder")],
            ..FakeApi::default()
        };
        let ctx = context(&tmp, MemorySecretStore::with_session("sid"), api);
        let invocation = Invocation {
            query: "/A".into(),
            group_id: Some("g".into()),
            file_id: Some("p".into()),
            parent_file_id: Some("0".into()),
            ..Invocation::default()
        };

        let feedback = answer(&ctx, &invocation);

        assert_eq!(feedback.items[0].title, "..");
        assert_eq!(feedback.items[0].variables["fileid"], "0");
        assert_eq!(feedback.items[1].title, "x");
        assert_eq!(feedback.items[1].variables["groupid"], "g");
        assert_eq!(feedback.items[1].variables["parentFileid"], "p");
        assert_eq!(feedback.items[1].variables["path"], "/A/x");
    }

    #[test]
    fn test_unknown_folder_shows_notice_and_up() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp, MemorySecretStore::with_session("sid"), FakeApi::default());

        let feedback = answer(&ctx, &Invocation::new("/Nowhere"));

        assert_eq!(titles(&feedback), vec!["Folder not found", ".."]);
    }
}
