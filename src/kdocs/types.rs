use serde::{Deserialize, Serialize};

/// Recently opened ("roaming") document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatestFile {
    pub app_type: String,
    pub b64fname: String,
    pub collection_time: i64,
    pub ctime: i64,
    pub current_device_id: String,
    pub current_device_name: String,
    pub current_device_type: String,
    pub deleted: i64,
    pub file_ctime: i64,
    pub file_src: String,
    pub file_src_type: String,
    #[serde(rename = "fileid")]
    pub file_id: String,
    pub group_type: String,
    #[serde(rename = "groupid")]
    pub group_id: i64,
    pub is_tmp: i64,
    /// Milliseconds since the epoch
    pub mtime: i64,
    pub name: String,
    pub operation: String,
    pub original_device_name: String,
    pub original_device_type: String,
    /// Local path on the device that last opened it, empty for cloud-only files
    pub path: String,
    #[serde(rename = "roamingid")]
    pub roaming_id: String,
    pub size: i64,
}

/// Keyword search hit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Doc {
    #[serde(rename = "groupid")]
    pub group_id: i64,
    #[serde(rename = "parentid")]
    pub parent_id: i64,
    pub fname: String,
    pub fsize: i64,
    pub ftype: String,
    pub ctime: i64,
    pub mtime: i64,
    /// Reported as a bool or an int depending on the backend
    pub deleted: serde_json::Value,
    /// Cloud path of the containing folder
    pub path: String,
    pub new_path: String,
    pub id: i64,
}

/// Search endpoint envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub total: i64,
    pub status: i64,
    pub files: Vec<Doc>,
}

/// Entry in a group or folder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    #[serde(rename = "groupid")]
    pub group_id: i64,
    #[serde(rename = "parentid")]
    pub parent_id: i64,
    pub fname: String,
    pub fsize: i64,
    pub ftype: String,
    pub ctime: i64,
    pub mtime: i64,
    pub deleted: bool,
    pub id: i64,
    pub store: i64,
    pub storeid: String,
    pub fver: i64,
    pub fsha: String,
}

impl File {
    pub fn is_folder(&self) -> bool {
        self.ftype.contains("folder")
    }
}

/// Top-level group entry: a file plus the id of the group it links to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(flatten)]
    pub file: File,
    /// Non-zero for groups shared with the user by someone else
    #[serde(rename = "linkgroupid", default)]
    pub link_group_id: i64,
}

impl Group {
    pub fn is_link_group(&self) -> bool {
        self.link_group_id != 0
    }

    /// Group id used to list this group's children
    pub fn effective_group_id(&self) -> i64 {
        if self.is_link_group() {
            self.link_group_id
        } else {
            self.file.group_id
        }
    }
}

/// Paged listing envelope shared by the group and folder endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListResponse<T> {
    #[serde(default)]
    pub next_filter: String,
    #[serde(default)]
    pub next_offset: i64,
    #[serde(default)]
    pub result: String,
    #[serde(default = "Vec::new")]
    pub files: Vec<T>,
}

/// One segment of a resolved file path, root first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSegment {
    pub fname: String,
    #[serde(rename = "fileid")]
    pub file_id: i64,
    #[serde(rename = "corpid")]
    pub corp_id: i64,
    #[serde(rename = "groupid")]
    pub group_id: i64,
    #[serde(rename = "linkgroupid")]
    pub link_group_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// File-path endpoint envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePathResponse {
    pub group_type: String,
    pub path: Vec<PathSegment>,
    pub result: String,
}

/// Where in the folder hierarchy a path points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFile {
    #[serde(rename = "groupid")]
    pub group_id: String,
    #[serde(rename = "islinkgroup")]
    pub is_link_group: bool,
    /// Id of the folder itself, i.e. the parent id for listing its children
    #[serde(rename = "fileid")]
    pub file_id: i64,
}
