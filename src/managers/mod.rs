// Harbor state managers
// Managers own mutable state: tabs and groups, hibernation, the view router,
// and the bookmark/history/download/notes/permission libraries.

pub mod bookmark_manager;
pub mod download_manager;
pub mod hibernation;
pub mod history_manager;
pub mod notes_manager;
pub mod permission_manager;
pub mod tab_groups;
pub mod tab_manager;
pub mod view_router;
