mod audit;
mod group;
mod helpers;
mod init;
mod merge;
mod mgmt_group;

pub use audit::{execute_audit, run_audit};
pub use group::{create_group, execute_group_create, GroupOutcome};
pub use init::execute_init;
pub use merge::{execute_merge, run_merge, MergeOptions, MergeSummary};
pub use mgmt_group::{
    create_batch, execute_mgmt_group_create, parse_batch, BatchSummary, MgmtGroupEntry,
};
