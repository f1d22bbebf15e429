use serde::{Deserialize, Serialize};

#[derive(Deserialize, utoipa::IntoParams)]
pub struct OutcomeListQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
}

/// A fixed outcome-label option offered when composing event conditions.
#[derive(Serialize, Clone, utoipa::ToSchema)]
pub struct OutcomeOption {
    pub id: i32,
    pub name: &'static str,
}

/// The options the admin UI offers for event conditions.
pub const OUTCOME_OPTIONS: &[OutcomeOption] = &[
    OutcomeOption { id: 1, name: "Yes" },
    OutcomeOption { id: 2, name: "No" },
    OutcomeOption {
        id: 3,
        name: "Over",
    },
    OutcomeOption {
        id: 4,
        name: "Under",
    },
];
