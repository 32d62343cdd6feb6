//! Broker command presentation: tab separated config listing.

use crate::cluster::commands::{wrap, BrokerConfigsResult, VALUE_WRAP_WIDTH};

/// `NAME\tVALUE\tDEFAULT` rows; long values continue on following lines under VALUE.
pub fn format_broker_configs_text(result: &BrokerConfigsResult) -> String {
    let mut out = String::from("NAME\tVALUE\tDEFAULT\n");
    for entry in &result.entries {
        let value = match (&entry.value, entry.is_sensitive) {
            (Some(v), _) => v.clone(),
            (None, true) => "(sensitive)".to_string(),
            (None, false) => String::new(),
        };
        let mut lines = wrap(&value, VALUE_WRAP_WIDTH).into_iter();
        let first = lines.next().unwrap_or_default();
        out.push_str(&format!("{}\t{}\t{}\n", entry.name, first, entry.is_default));
        for line in lines {
            out.push_str(&format!("\t{}\n", line));
        }
    }
    out.trim_end().to_string()
}
