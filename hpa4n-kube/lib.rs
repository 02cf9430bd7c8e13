pub use self::client::{ClientError, HpaClient, get_client};
pub use self::conditions::{ABLE_TO_SCALE, ConditionState, ConditionSummary, SCALING_ACTIVE, SCALING_LIMITED};
pub use self::events::{EventRow, event_selector, to_event_rows};
pub use self::row::HpaRow;
pub use self::session::{
    ALIAS_ANNOTATION, DESCRIPTION_ANNOTATION, HpaForm, HpaSession, MetricUpdate, RulesUpdate, SCALE_TARGET_KIND_LABEL,
    SCALE_TARGET_NAME_LABEL, ScaleTarget, SessionError, SessionUpdate,
};
pub use self::source::{SourceError, load_manifests, manifest_to_patch, parse_manifests};
pub use self::workload::{RELATED_HPA_ANNOTATION, WorkloadKind, WorkloadRef};

pub mod utils;

mod client;
mod conditions;
mod events;
mod row;
mod session;
mod source;
mod workload;
