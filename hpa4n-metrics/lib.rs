pub use self::behavior::{
    BehaviorError, BehaviorPolicy, FormBehavior, FormScalingRules, PolicyType, ScalingDirection, SelectPolicy,
    behavior_to_spec, spec_to_behavior, validate_behavior,
};
pub use self::form::{FormMetric, FormMetrics, form_metrics_to_spec, spec_to_form_metrics};
pub use self::format::{
    EMPTY_VALUE, format_cpu_metric_value, format_current_metric, format_memory_metric_value, format_metric_value,
    format_target_metric,
};
pub use self::locator::{current_metrics, find_current_metric, find_target_metric, target_metrics};
pub use self::metric::{MetricValue, ResourceName, TargetType};
pub use self::quantity::{
    CanonicalQuantity, Mebibytes, ParsedQuantity, QuantityError, canonical_to_quantity, mebibytes_to_quantity,
    millicores_to_quantity, quantity_to_canonical,
};
pub use self::validation::{MetricsError, validate_form_metrics};

mod behavior;
mod form;
mod format;
mod locator;
mod metric;
mod quantity;
mod validation;
