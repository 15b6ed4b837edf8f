// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Deep merge of YAML documents.

use serde_yaml::{Mapping, Value};

#[cfg(test)]
#[path = "./merge_test.rs"]
mod merge_test;

/// Merge `overlay` on top of `base`, returning the combined mapping.
///
/// Keys holding a mapping on both sides are merged recursively. For every
/// other key the overlay's value replaces the base value outright: sequences
/// are not concatenated and a scalar may replace a mapping or the reverse.
/// Keys keep the order of `base`, with new overlay keys appended.
pub fn deep_merge(base: &Mapping, overlay: &Mapping) -> Mapping {
    let mut result = base.clone();
    merge_into(&mut result, overlay);
    result
}

/// In-place form of [`deep_merge`].
pub fn merge_into(base: &mut Mapping, overlay: &Mapping) {
    for (key, value) in overlay {
        if let (Some(Value::Mapping(existing)), Value::Mapping(incoming)) =
            (base.get_mut(key), value)
        {
            merge_into(existing, incoming);
            continue;
        }
        base.insert(key.clone(), value.clone());
    }
}
