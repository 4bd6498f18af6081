pub mod client;
pub mod duplication;
pub mod folder;
pub mod workflow;

pub use client::ClientData;
pub use duplication::{
    DuplicateOptions, DuplicationFailure, DuplicationResult, DuplicationStage,
    FolderDuplicationResult,
};
pub use folder::{Folder, FolderView, WorkflowSummary};
pub use workflow::{CreateWorkflowRequest, Node, Tag, TagList, Workflow, WorkflowList};
