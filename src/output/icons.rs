//! Icon selection by file type and extension

pub const FOLDER: &str = "folder.png";
pub const LINK_FOLDER: &str = "linkfolder.png";
pub const RECENT: &str = "recent.png";
pub const BACK: &str = "back.png";
pub const WARNING: &str = "warning.png";

/// Icon for a file name, by extension
pub fn for_name(name: &str) -> &'static str {
    let ext = name.rsplit('.').next().unwrap_or_default().to_lowercase();
    match ext.as_str() {
        "doc" | "docx" => "doc.png",
        "pdf" => "pdf.png",
        "pptx" => "pptx.png",
        "txt" => "txt.png",
        "csv" | "xls" | "xlsx" => "xlsx.png",
        _ => "unknown.png",
    }
}

/// Icon for a listing entry, by its `ftype`
pub fn for_ftype(name: &str, ftype: &str) -> &'static str {
    match ftype {
        "folder" => FOLDER,
        "linkfolder" => LINK_FOLDER,
        "file" | "sharefile" => for_name(name),
        _ => FOLDER,
    }
}
