use std::collections::BTreeMap;

/// Label sets as stored on kubernetes objects
pub type Labels = BTreeMap<String, String>;

/// The mandatory identity label every generated resource carries
pub const APP_LABEL: &str = "app";

/// The label base pods are selected by
///
/// Only the identity label; extra labels never take part in selection.
pub fn selector_labels(name: &str) -> Labels {
    let mut res = Labels::new();
    res.insert(APP_LABEL.to_string(), name.to_string());
    res
}

/// Merge the identity label with caller supplied labels
///
/// Returns a fresh map on every call; nothing is shared between resources.
/// The identity label wins over a conflicting `app` key.
pub fn merged_labels(name: &str, extra: &Labels) -> Labels {
    let mut res = extra.clone();
    res.extend(selector_labels(name));
    res
}

/// Whether every selector key/value appears in `labels`
pub fn selector_matches(selector: &Labels, labels: &Labels) -> bool {
    selector.iter().all(|(k, v)| labels.get(k) == Some(v))
}
