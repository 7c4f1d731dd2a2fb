use crate::query::{offsets::is_paginable, strip_terminator};
use serde::{Deserialize, Serialize};

/// How a statement is going to be sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionPlan {
    /// Sent once, exactly as written.
    Direct { sql: String },

    /// Probed with `limit 1`, then fetched page by page. `template` is the
    /// trimmed statement without its trailing `;`.
    Paginated { template: String },
}

impl ExecutionPlan {
    pub fn is_paginated(&self) -> bool {
        matches!(self, ExecutionPlan::Paginated { .. })
    }
}

pub struct ExecutionPlanner;

impl ExecutionPlanner {
    pub fn plan(sql: &str) -> ExecutionPlan {
        if is_paginable(sql) {
            ExecutionPlan::Paginated {
                template: strip_terminator(sql).to_string(),
            }
        } else {
            ExecutionPlan::Direct {
                sql: sql.to_string(),
            }
        }
    }
}
