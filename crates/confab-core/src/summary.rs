//! Rolling conversation summary.

use serde::{Deserialize, Serialize};

/// The rolling summary of a session, together with how many interactions it
/// covers. A session with no stored summary reads back as the default —
/// an empty summary covering zero turns — never as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
  pub summary:      String,
  pub n_summarized: i64,
}
