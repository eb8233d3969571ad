use tracing::{debug, warn};

use super::{Failure, Fetched, Listings};
use crate::cache::CacheKey;
use crate::config::ListingKind;
use crate::error::Result;
use crate::kdocs::{File, GroupFile};
use crate::navigation::{child_path, parent_path, NavigationState};

/// One row of a folder listing
#[derive(Debug, Clone, PartialEq)]
pub enum FolderEntry {
    /// Synthetic ".." row pointing at the enclosing folder
    Up {
        path: String,
        group_id: String,
        file_id: String,
    },
    Child(File),
}

/// Contents of a folder, always headed by the ".." row
#[derive(Debug, Clone)]
pub struct FolderListing {
    pub path: String,
    pub state: NavigationState,
    pub entries: Vec<FolderEntry>,
}

impl<'a> Listings<'a> {
    /// Children of the folder at `path`
    ///
    /// The folder is located with the explicit ids when given, else from the
    /// state recorded for `path` by an earlier listing. A refresh records
    /// state for every child so the next level can be opened by path alone.
    /// `parent_file_id` is the id of the enclosing folder and is carried on
    /// the ".." row; when absent it is taken from the state recorded for the
    /// enclosing path.
    pub fn folder(
        &self,
        path: &str,
        group_id: Option<&str>,
        file_id: Option<&str>,
        parent_file_id: Option<&str>,
    ) -> Result<Fetched<FolderListing>> {
        let sid = self.session()?;
        let resolver = self.resolver();
        let state = resolver.resolve(path, group_id, file_id);

        let up_path = parent_path(path);
        let up = FolderEntry::Up {
            file_id: parent_file_id
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .or_else(|| resolver.lookup(&up_path).map(|entry| entry.file_id.to_string()))
                .unwrap_or_default(),
            group_id: state.group_id.clone(),
            path: up_path,
        };

        if !state.is_known() {
            warn!(path, "folder location unknown, list its parent first");
            return Ok(Fetched {
                data: FolderListing {
                    path: path.to_string(),
                    state,
                    entries: vec![up],
                },
                refreshed: false,
                failure: Some(Failure::UnknownLocation(path.to_string())),
            });
        }

        let key = CacheKey::id_pair(&state.group_id, &state.parent_id);
        let fetched = self.read_through(ListingKind::Folder, &key, || {
            self.api
                .folder(&sid, &state.group_id, &state.parent_id)
                .map(|resp| resp.files)
        });

        if fetched.refreshed {
            for child in &fetched.data {
                resolver.record(
                    &child_path(path, &child.fname),
                    &GroupFile {
                        group_id: state.group_id.clone(),
                        is_link_group: state.is_link_group,
                        file_id: child.id,
                    },
                );
            }
            debug!(path, children = fetched.data.len(), "recorded child navigation state");
        }

        Ok(fetched.map(|children| {
            let mut entries = Vec::with_capacity(children.len() + 1);
            entries.push(up);
            entries.extend(children.into_iter().map(FolderEntry::Child));
            FolderListing {
                path: path.to_string(),
                state,
                entries,
            }
        }))
    }
}
