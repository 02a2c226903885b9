//! PrereqTree Core — course graph model, leveling, layout, and persistence

pub mod error;
pub mod graph;
pub mod layout;
pub mod level;
pub mod model;
pub mod storage;
pub mod store;
pub mod transfer;


#[cfg(test)]
pub mod test_utils;

pub use error::StoreError;
pub use graph::{PrereqGraph, creates_cycle};
pub use layout::{
    LayoutEdge, LayoutNode, LayoutResult, NODE_HEIGHT, NODE_SEP, NODE_WIDTH, Point, RANK_SEP,
    Theme, layout_graph, level_color,
};
pub use level::{LevelMap, compute_levels, display_order};
pub use model::{
    AppData, Course, CourseId, DATA_VERSION, LegacyCourse, Workspace, WorkspaceId, now_millis,
};
pub use storage::{
    APP_DATA_FILE, DATA_DIR, LEGACY_FILE, app_data_path, clear_legacy, data_dir, ensure_data_dir,
    legacy_path, load_app_data, load_legacy, load_or_migrate, save_app_data,
};
pub use store::{CourseStore, LayoutSnapshot, MAX_NAME_LEN};
pub use transfer::{ImportError, ImportedWorkspace, export_workspace, import_workspace};
