//! The px to viewport rewrite pass.
//!
//! For every style rule the pass checks, in order: the include/exclude file
//! filters, the selector blacklist, the landscape copy (top-level rules
//! only), and the media query gate. Eligible declarations are then
//! rewritten unless an ignore comment sits next to them. Landscape copies
//! are collected during the walk and appended as one
//! `@media (orientation: landscape)` block at the end.

use crate::ast::{AtRule, Declaration, Node, Rule, Stylesheet};
use crate::config::Config;
use crate::convert::Conversion;
use crate::matcher::{PropList, UnitPattern};
use crate::processor::{Plugin, ProcessResult};
use crate::Result;

/// Comment placed before a declaration to keep it unconverted.
pub const IGNORE_NEXT_COMMENT: &str = "px-to-viewport-ignore-next";

/// Comment placed after a declaration, on the same line, to keep it
/// unconverted.
pub const IGNORE_PREV_COMMENT: &str = "px-to-viewport-ignore";

/// Params of the synthesized landscape block.
pub const LANDSCAPE_PARAMS: &str = "(orientation: landscape)";

const PLUGIN_NAME: &str = "px-to-viewport";

/// Rewrites pixel lengths into viewport units.
///
/// Configuration is validated and compiled once in [`PxToViewport::new`];
/// each [`Plugin::once`] call keeps its landscape rules local, so one
/// instance can process any number of stylesheets.
#[derive(Debug, Clone)]
pub struct PxToViewport {
    config: Config,
    unit_pattern: UnitPattern,
    prop_list: PropList,
}

impl PxToViewport {
    /// Validate the configuration and compile its matchers.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let unit_pattern = UnitPattern::new(&config.source_unit)?;
        let prop_list = PropList::new(&config.prop_list);

        Ok(Self {
            config,
            unit_pattern,
            prop_list,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rewrite a stylesheet in place, returning the warnings raised.
    pub fn process(&self, root: &mut Stylesheet) -> ProcessResult {
        let mut result = ProcessResult::new();
        self.transform(root, &mut result);
        result
    }

    fn transform(&self, root: &mut Stylesheet, result: &mut ProcessResult) {
        let mut landscape_rules = Vec::new();

        root.walk_rules_mut(|rule, params| {
            self.process_rule(rule, params, &mut landscape_rules, result);
        });

        if !landscape_rules.is_empty() {
            tracing::info!(
                "Appending landscape block with {} rule(s)",
                landscape_rules.len()
            );
            let mut media = AtRule::media(LANDSCAPE_PARAMS);
            for rule in landscape_rules {
                media.push(rule);
            }
            root.push(media);
        }
    }

    fn process_rule(
        &self,
        rule: &mut Rule,
        params: Option<&str>,
        landscape_rules: &mut Vec<Rule>,
        result: &mut ProcessResult,
    ) {
        if !self.in_file_scope(rule) {
            tracing::debug!("Skipping '{}': file filtered", rule.selector);
            return;
        }

        if self.is_blacklisted(&rule.selector) {
            tracing::debug!("Skipping '{}': selector blacklisted", rule.selector);
            return;
        }

        let params = params.filter(|params| !params.is_empty());

        if self.config.landscape_enabled && params.is_none() {
            if let Some(variant) = self.landscape_variant(rule) {
                landscape_rules.push(variant);
            }
        }

        if params.is_some() && !self.config.convert_in_media_query {
            tracing::debug!("Skipping '{}': inside media query", rule.selector);
            return;
        }

        let in_landscape_query =
            self.config.landscape_enabled && params.is_some_and(|p| p.contains("landscape"));
        self.rewrite_declarations(rule, in_landscape_query, result);
    }

    fn in_file_scope(&self, rule: &Rule) -> bool {
        let Some(file) = rule.file() else {
            return true;
        };

        if let Some(include) = &self.config.include_filter {
            if !include.matches(file) {
                return false;
            }
        }
        if let Some(exclude) = &self.config.exclude_filter {
            if exclude.matches(file) {
                return false;
            }
        }
        true
    }

    fn is_blacklisted(&self, selector: &str) -> bool {
        self.config
            .selector_blacklist
            .iter()
            .any(|entry| entry.matches(selector))
    }

    fn is_candidate(&self, decl: &Declaration) -> bool {
        decl.value.contains(self.config.source_unit.as_str()) && self.prop_list.matches(&decl.prop)
    }

    fn landscape_variant(&self, rule: &Rule) -> Option<Rule> {
        let conversion = self.conversion(&self.config.landscape_unit, self.config.landscape_width);
        let mut variant = rule.clone_empty();

        for decl in rule.declarations().filter(|decl| self.is_candidate(decl)) {
            let value = self.convert_value(&decl.value, conversion);
            variant.push(decl.with_value(value));
        }

        (!variant.nodes.is_empty()).then_some(variant)
    }

    fn rewrite_declarations(&self, rule: &mut Rule, in_landscape_query: bool, result: &mut ProcessResult) {
        let mut index = 0;

        while index < rule.nodes.len() {
            let Some(decl) = rule.nodes[index].as_declaration() else {
                index += 1;
                continue;
            };
            if !self.is_candidate(decl) {
                index += 1;
                continue;
            }

            if index > 0 && is_comment(&rule.nodes[index - 1], IGNORE_NEXT_COMMENT) {
                // The declaration moves to `index - 1`; `index` is now the
                // node after it.
                rule.nodes.remove(index - 1);
                continue;
            }

            if let Some(next) = rule.nodes.get(index + 1).and_then(Node::as_comment) {
                if next.text == IGNORE_PREV_COMMENT {
                    if next.is_on_own_line() {
                        let text = format!(
                            "Unexpected comment /* {} */ must be after declaration at same line.",
                            IGNORE_PREV_COMMENT
                        );
                        tracing::warn!(
                            "{} (line {}, column {})",
                            text,
                            next.source.line,
                            next.source.column
                        );
                        result.warn(PLUGIN_NAME, text, &next.source);
                    } else {
                        rule.nodes.remove(index + 1);
                        index += 1;
                        continue;
                    }
                }
            }

            let Some(decl) = rule.nodes[index].as_declaration() else {
                index += 1;
                continue;
            };
            let conversion = if in_landscape_query {
                self.conversion(&self.config.landscape_unit, self.config.landscape_width)
            } else {
                self.conversion(self.unit_for(&decl.prop), self.config.base_width)
            };
            let value = self.convert_value(&decl.value, conversion);

            if rule.has_declaration(&decl.prop, &value) {
                index += 1;
                continue;
            }

            tracing::trace!("{}: '{}' -> '{}'", decl.prop, decl.value, value);

            if self.config.replace_in_place {
                if let Some(decl) = rule.nodes[index].as_declaration_mut() {
                    decl.value = value;
                }
                index += 1;
            } else {
                let converted = decl.with_value(value);
                rule.nodes.insert(index + 1, Node::Declaration(converted));
                index += 2;
            }
        }
    }

    fn unit_for(&self, prop: &str) -> &str {
        if prop.contains("font") {
            &self.config.font_target_unit
        } else {
            &self.config.target_unit
        }
    }

    fn conversion<'a>(&'a self, unit: &'a str, reference: f64) -> Conversion<'a> {
        Conversion {
            unit,
            reference,
            precision: self.config.precision,
            min_pixel_value: self.config.min_pixel_value,
        }
    }

    fn convert_value(&self, value: &str, conversion: Conversion<'_>) -> String {
        self.unit_pattern
            .replace_all(value, |token| conversion.apply(token))
            .into_owned()
    }
}

impl Plugin for PxToViewport {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn once(&self, root: &mut Stylesheet, result: &mut ProcessResult) -> Result<()> {
        self.transform(root, result);
        Ok(())
    }
}

fn is_comment(node: &Node, text: &str) -> bool {
    node.as_comment().is_some_and(|comment| comment.text == text)
}
