//! Turn listings into launcher items

use std::path::Path;

use super::feedback::{Feedback, Item};
use super::humanize::{file_size, since};
use super::icons;
use crate::kdocs::{Doc, Group, LatestFile};
use crate::listing::{Failure, Fetched, FolderEntry, FolderListing, MY_DOCS_DIR, TEAM_DOCS_DIR};

/// Where document links and local copies live
#[derive(Debug, Clone, Default)]
pub struct Locations {
    /// Web root, e.g. `https://www.kdocs.cn`
    pub open_url: String,
    /// Directory the desktop client syncs documents into, empty when unknown
    pub cache_dir: String,
}

impl Locations {
    fn file_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}/p/{id}", self.open_url)
    }

    fn team_url(&self, group_id: i64, id: i64) -> String {
        format!("{}/team/{group_id}/{id}", self.open_url)
    }

    fn local(&self, rest: &str) -> String {
        if self.cache_dir.is_empty() {
            String::new()
        } else {
            format!("{}{rest}", self.cache_dir)
        }
    }
}

/// Notice describing why a listing could not be refreshed
pub fn failure_notice(failure: &Failure) -> Item {
    match failure {
        Failure::Remote(detail) => Item::notice("Query failed", detail.clone()),
        Failure::UnknownLocation(path) => Item::notice(
            "Folder not found",
            format!("Browse to {path} from its parent folder first"),
        ),
    }
}

/// Collect items into feedback, with any failure notice first
pub fn feedback<T>(fetched: &Fetched<T>, items: Vec<Item>) -> Feedback {
    let mut out = Feedback::new();
    if let Some(failure) = &fetched.failure {
        out.push(failure_notice(failure));
    }
    out.items.extend(items);
    out
}

/// Recently opened documents, headed by an entry into the folder browser
///
/// `local_copy` supplies the quicklook path for documents that were never
/// opened on this device.
pub fn recent<F>(files: &[LatestFile], loc: &Locations, local_copy: F) -> Vec<Item>
where
    F: Fn(&LatestFile) -> String,
{
    let mut items = Vec::with_capacity(files.len() + 1);
    items.push(
        Item::new("Browse")
            .subtitle("Browse all folders")
            .icon(icons::FOLDER)
            .var("groupid", "0")
            .var("fileid", "0")
            .var("path", "/")
            .autocomplete("/"),
    );

    for file in files {
        let quicklook = if file.path.is_empty() {
            local_copy(file)
        } else {
            file.path.clone()
        };
        items.push(
            Item::new(&file.name)
                .subtitle(format!(
                    "{} · opened on {} {}",
                    since(file.mtime / 1000),
                    file.original_device_type,
                    file.original_device_name
                ))
                .icon(icons::for_name(&file.name))
                .var("fileid", &file.file_id)
                .var("name", &file.name)
                .var("dir", &quicklook)
                .var("url", loc.file_url(&file.file_id))
                .quicklook(quicklook)
                .document_actions()
                .reveal_action(),
        );
    }
    items
}

/// Keyword search hits
pub fn search(docs: &[Doc], loc: &Locations) -> Vec<Item> {
    if docs.is_empty() {
        return vec![Item::notice("No files found", "Try searching with other keywords")];
    }

    docs.iter()
        .map(|doc| {
            let url = if doc.ftype == "folder" {
                loc.team_url(doc.group_id, doc.id)
            } else {
                loc.file_url(doc.id)
            };
            Item::new(&doc.fname)
                .subtitle(format!("{} · {} · {}", since(doc.mtime), doc.path, file_size(doc.fsize)))
                .icon(icons::for_name(&doc.fname))
                .var("name", &doc.fname)
                .var("fileid", doc.id.to_string())
                .var("url", url)
                .quicklook(search_local_copy(doc, loc))
                .document_actions()
        })
        .collect()
}

/// Local copy of a search hit
///
/// Search reports shared documents under the personal root, while the
/// desktop client syncs them under the team root. Prefer the team location
/// when the file exists there.
fn search_local_copy(doc: &Doc, loc: &Locations) -> String {
    let team = loc.local(&format!(
        "/{}/{}",
        doc.path.replacen(MY_DOCS_DIR, TEAM_DOCS_DIR, 1),
        doc.fname
    ));
    if team.is_empty() || Path::new(&team).exists() {
        return team;
    }
    team.replacen(&format!("/{TEAM_DOCS_DIR}"), "", 1)
}

/// Top-level groups, headed by an entry back to recent documents
pub fn groups(groups: &[Group], loc: &Locations) -> Vec<Item> {
    let mut items = Vec::with_capacity(groups.len() + 1);
    items.push(
        Item::new("Recent")
            .subtitle("Recently opened documents")
            .icon(icons::RECENT)
            .var("groupid", "0")
            .var("fileid", "0")
            .var("path", "")
            .autocomplete(""),
    );

    for group in groups {
        let file = &group.file;
        let url = if group.is_link_group() {
            format!("{}/team/{}?folderid={}", loc.open_url, group.link_group_id, file.id)
        } else {
            format!("{}/mine/{}", loc.open_url, file.id)
        };
        let path = format!("/{}", file.fname);
        items.push(
            Item::new(&file.fname)
                .subtitle(since(file.mtime))
                .icon(icons::for_ftype(&file.fname, &file.ftype))
                .var("fileid", file.id.to_string())
                .var("name", &file.fname)
                .var("groupid", group.effective_group_id().to_string())
                .var("url", url)
                .var("path", &path)
                .autocomplete(path)
                .document_actions(),
        );
    }
    items
}

/// Folder contents, headed by the ".." entry
pub fn folder(listing: &FolderListing, loc: &Locations) -> Vec<Item> {
    let state = &listing.state;
    let base = listing.path.trim_end_matches('/');

    listing
        .entries
        .iter()
        .map(|entry| match entry {
            FolderEntry::Up {
                path,
                group_id,
                file_id,
            } => Item::new("..")
                .subtitle("Back to parent folder")
                .icon(icons::BACK)
                .var("groupid", group_id)
                .var("fileid", file_id)
                .var("path", path)
                .autocomplete(path)
                .document_actions(),
            FolderEntry::Child(file) => {
                let path = format!("{base}/{}", file.fname);
                let (quicklook, url) = if state.is_link_group {
                    let url = if file.is_folder() {
                        loc.team_url(file.group_id, file.id)
                    } else {
                        loc.file_url(file.id)
                    };
                    (loc.local(&format!("/{TEAM_DOCS_DIR}{path}")), url)
                } else {
                    let url = if file.is_folder() {
                        format!("{}/mine/{}", loc.open_url, file.id)
                    } else {
                        loc.file_url(file.id)
                    };
                    (loc.local(&path), url)
                };
                Item::new(&file.fname)
                    .subtitle(since(file.mtime))
                    .icon(icons::for_ftype(&file.fname, &file.ftype))
                    .var("groupid", &state.group_id)
                    .var("fileid", file.id.to_string())
                    .var("parentFileid", &state.parent_id)
                    .var("name", &file.fname)
                    .var("dir", &quicklook)
                    .var("url", url)
                    .var("path", &path)
                    .autocomplete(path)
                    .quicklook(quicklook)
                    .document_actions()
                    .reveal_action()
            }
        })
        .collect()
}
