//! Fold a freshly synthesized tree into the previous one.
//!
//! Siblings are matched by `originalIdentifier`, then by `accessor`. A
//! matched field whose inferred type is unchanged keeps everything the user
//! set; one whose type changed is rebuilt from the fresh field and keeps
//! only the customizations that still apply to its new type.

use std::collections::HashSet;

use tracing::trace;

use crate::config::SchemaLimits;
use crate::constants::MONGO_ID_KEY;
use crate::infer::infer_field_type_at;
use crate::properties::FieldPropertyRegistry;
use crate::sanitize::claim_unique;
use crate::schema::{Schema, SchemaItem};
use crate::stylesheet::FieldThemeStylesheets;
use crate::synth::{is_default_value_binding, Budget, LimitExceeded};

/// Tells user customizations apart from values generation put on a field.
pub(crate) struct Customizations<'a> {
    registry: &'a FieldPropertyRegistry,
    widget_name: &'a str,
    stylesheets: Option<&'a FieldThemeStylesheets>,
}

impl<'a> Customizations<'a> {
    pub fn new(
        registry: &'a FieldPropertyRegistry,
        widget_name: &'a str,
        stylesheets: Option<&'a FieldThemeStylesheets>,
    ) -> Self {
        Self {
            registry,
            widget_name,
            stylesheets,
        }
    }

    /// Whether `prev`'s `name` still holds what generation gave it.
    /// `source_path` is where `prev` read its data from.
    fn is_generated(
        &self,
        prev: &SchemaItem,
        name: &str,
        source_path: Option<&[String]>,
    ) -> bool {
        let Some(value) = prev.prop(name) else {
            return false;
        };
        if name == "defaultValue" {
            return source_path
                .is_some_and(|path| is_default_value_binding(self.widget_name, path, value));
        }
        self.registry.get(name).is_some_and(|def| def.is_themed)
            && self
                .stylesheets
                .and_then(|sheets| sheets.value(prev.field_type, name))
                == Some(value)
    }

    /// Keep `fresh`, moving over identity, label and the customizations that
    /// apply to the fresh field type. Generated values stay fresh.
    pub fn carry_over(
        &self,
        prev: &SchemaItem,
        mut fresh: SchemaItem,
        source_path: Option<&[String]>,
    ) -> SchemaItem {
        fresh.identifier = prev.identifier.clone();
        fresh.accessor = prev.accessor.clone();
        fresh.label = prev.label.clone();
        fresh.is_custom_field = prev.is_custom_field;
        for (name, value) in &prev.props {
            if self.registry.carries_over(name, fresh.field_type)
                && !self.is_generated(prev, name, source_path)
            {
                fresh.props.insert(name.clone(), value.clone());
            }
        }
        fresh
    }

    /// Replace `name` on `merged` with the fresh value if `prev` held a
    /// generated one.
    fn refresh(
        &self,
        merged: &mut SchemaItem,
        prev: &SchemaItem,
        fresh: &SchemaItem,
        name: &str,
        source_path: Option<&[String]>,
    ) {
        if !self.is_generated(prev, name, source_path) {
            return;
        }
        match fresh.prop(name) {
            Some(value) => merged.set_prop(name, value.clone()),
            None => {
                merged.props.shift_remove(name);
            }
        }
    }
}

pub(crate) struct Merger<'a> {
    limits: &'a SchemaLimits,
    customizations: Customizations<'a>,
    budget: &'a mut Budget,
}

impl<'a> Merger<'a> {
    pub fn new(
        limits: &'a SchemaLimits,
        customizations: Customizations<'a>,
        budget: &'a mut Budget,
    ) -> Self {
        Self {
            limits,
            customizations,
            budget,
        }
    }

    /// Merge the fresh root into the previous root.
    pub fn merge_root(
        &mut self,
        prev: &SchemaItem,
        fresh: SchemaItem,
    ) -> Result<SchemaItem, LimitExceeded> {
        self.merge(prev, fresh, 0, Some(&[]))
    }

    /// Merge `fresh` into `prev`, both sitting `depth` levels below the root.
    /// `prev_path` is where `prev` read its data from.
    ///
    /// Custom fields kept from `prev` are charged to the budget here; fresh
    /// fields were charged during synthesis.
    fn merge(
        &mut self,
        prev: &SchemaItem,
        fresh: SchemaItem,
        depth: usize,
        prev_path: Option<&[String]>,
    ) -> Result<SchemaItem, LimitExceeded> {
        let prev_type = infer_field_type_at(&prev.source_data, depth, self.limits);
        let fresh_type = infer_field_type_at(&fresh.source_data, depth, self.limits);

        if prev_type != fresh_type {
            trace!(
                identifier = %prev.identifier,
                from = %prev_type,
                to = %fresh_type,
                "field type changed"
            );
            return Ok(self.customizations.carry_over(prev, fresh, prev_path));
        }

        let mut merged = prev.clone();
        self.customizations
            .refresh(&mut merged, prev, &fresh, "defaultValue", prev_path);
        merged.children =
            self.merge_children(&prev.children, fresh.children, depth + 1, prev_path)?;
        // An accessor match may pair the field with a renamed source key.
        merged.original_identifier = fresh.original_identifier;
        merged.source_data = fresh.source_data;
        merged.position = fresh.position;
        Ok(merged)
    }

    fn merge_children(
        &mut self,
        prev: &Schema,
        fresh: Schema,
        depth: usize,
        parent_path: Option<&[String]>,
    ) -> Result<Schema, LimitExceeded> {
        let fresh: Vec<SchemaItem> = fresh.into_values().collect();
        let matches = match_siblings(prev, &fresh);

        // Matched and custom fields keep their names; fresh ones yield.
        let mut taken_ids: HashSet<String> = HashSet::new();
        let mut taken_accessors: HashSet<String> = HashSet::new();
        let matched = matches.iter().flatten().map(|id| &prev[id.as_str()]);
        let custom = prev.values().filter(|item| item.is_custom_field);
        for item in matched.chain(custom) {
            taken_ids.insert(item.identifier.clone());
            taken_accessors.insert(item.accessor.clone());
        }

        let mut merged = Schema::with_capacity(fresh.len());
        for (mut item, matched) in fresh.into_iter().zip(matches) {
            item = match matched {
                Some(prev_id) => {
                    let prev_item = &prev[prev_id.as_str()];
                    let prev_path = child_source_path(parent_path, prev_item);
                    self.merge(prev_item, item, depth, prev_path.as_deref())?
                }
                None => {
                    item.identifier = claim_unique(&item.identifier, |id| {
                        taken_ids.contains(id) || merged.contains_key(id)
                    });
                    item.accessor = claim_unique(&item.accessor, |a| taken_accessors.contains(a));
                    taken_ids.insert(item.identifier.clone());
                    taken_accessors.insert(item.accessor.clone());
                    item
                }
            };
            merged.insert(item.identifier.clone(), item);
        }

        for item in prev.values().filter(|item| item.is_custom_field) {
            self.budget.charge(item.count())?;
            merged.insert(item.identifier.clone(), item.clone());
        }

        for (position, item) in merged.values_mut().enumerate() {
            item.position = position as i64;
        }
        Ok(merged)
    }
}

/// Where `child` reads its data from, given its parent's path. Array item
/// templates have no fixed location.
pub(crate) fn child_source_path(
    parent: Option<&[String]>,
    child: &SchemaItem,
) -> Option<Vec<String>> {
    if child.is_array_item() {
        return None;
    }
    parent.map(|path| {
        let mut path = path.to_vec();
        path.push(child.original_identifier.clone());
        path
    })
}

/// For each fresh sibling, the identifier of the previous sibling it
/// continues, if any. Original keys are matched before accessors so an
/// accessor match never steals a field another key maps to directly.
fn match_siblings(prev: &Schema, fresh: &[SchemaItem]) -> Vec<Option<String>> {
    let candidates: Vec<&SchemaItem> = prev.values().filter(|item| !item.is_custom_field).collect();
    let mut used: HashSet<&str> = HashSet::new();
    let mut matches: Vec<Option<String>> = vec![None; fresh.len()];

    for (slot, item) in matches.iter_mut().zip(fresh) {
        let found = candidates.iter().find(|p| {
            !used.contains(p.identifier.as_str()) && p.original_identifier == item.original_identifier
        });
        if let Some(p) = found {
            used.insert(p.identifier.as_str());
            *slot = Some(p.identifier.clone());
        }
    }

    for (slot, item) in matches.iter_mut().zip(fresh) {
        if slot.is_some() || item.original_identifier == MONGO_ID_KEY {
            continue;
        }
        let found = candidates.iter().find(|p| {
            !used.contains(p.identifier.as_str())
                && p.original_identifier != MONGO_ID_KEY
                && p.accessor == item.accessor
        });
        if let Some(p) = found {
            used.insert(p.identifier.as_str());
            *slot = Some(p.identifier.clone());
        }
    }
    matches
}
