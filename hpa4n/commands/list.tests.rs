use hpa4n_kube::{ConditionState, ConditionSummary};

use super::*;

fn state(status: bool) -> ConditionState {
    ConditionState {
        status: Some(status),
        ..Default::default()
    }
}

fn web_row() -> HpaRow {
    HpaRow {
        name: "web".to_owned(),
        namespace: "shop".to_owned(),
        alias: Some("Storefront".to_owned()),
        target: "Deployment/web".to_owned(),
        cpu_target: "80%".to_owned(),
        cpu_current: "45%".to_owned(),
        memory_target: EMPTY_VALUE.to_owned(),
        memory_current: EMPTY_VALUE.to_owned(),
        min_replicas: 1,
        max_replicas: 5,
        current_replicas: 2,
        desired_replicas: 3,
        age: Some("5m02s".to_owned()),
        conditions: ConditionSummary::default(),
    }
}

fn db_row() -> HpaRow {
    HpaRow {
        name: "db".to_owned(),
        namespace: "shop".to_owned(),
        alias: None,
        target: "StatefulSet/db".to_owned(),
        cpu_target: EMPTY_VALUE.to_owned(),
        cpu_current: EMPTY_VALUE.to_owned(),
        memory_target: "1024Mi".to_owned(),
        memory_current: "256Mi".to_owned(),
        min_replicas: 2,
        max_replicas: 4,
        current_replicas: 2,
        desired_replicas: 2,
        age: None,
        conditions: ConditionSummary {
            able_to_scale: state(true),
            scaling_active: state(true),
            scaling_limited: state(false),
        },
    }
}

#[test]
fn render_rows_test() {
    assert_eq!(
        "NAME   TARGET           CPU         MEMORY    MIN-MAX   REPLICAS   AGE\n\
         web    Deployment/web   80% / 45%   -- / --   1-5       2/3        5m02s\n",
        render_rows(&[web_row()], false, false)
    );
}

#[test]
fn render_rows_wide_test() {
    assert_eq!(
        "NAMESPACE   NAME   TARGET           CPU         MEMORY           MIN-MAX   REPLICAS   AGE     CONDITIONS    ALIAS\n\
         shop        web    Deployment/web   80% / 45%   -- / --          1-5       2/3        5m02s   A:? S:? L:?   Storefront\n\
         shop        db     StatefulSet/db   -- / --     1024Mi / 256Mi   2-4       2/2        --      A:T S:T L:F\n",
        render_rows(&[web_row(), db_row()], true, true)
    );
}
