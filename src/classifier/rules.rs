//! Keyword rule registry.
//!
//! The registry maps each label to an ordered list of trigger keywords.
//! Edits never mutate a rule set in place: `add_rule` builds a new
//! [`RuleSet`] and swaps it in, so a snapshot taken before the edit keeps
//! seeing the old rules for as long as it is held.

use std::sync::{Arc, RwLock};

use super::matcher::normalize;

/// Built-in rules in registration order.
///
/// Registration order is the tie-break for the primary label, so
/// `unsolicited-bulk` is deliberately registered ahead of `promotional`.
pub const DEFAULT_RULES: &[(&str, &[&str])] = &[
    (
        "unsolicited-bulk",
        &["免费", "赢取", "立即点击", "限时优惠", "大奖"],
    ),
    ("promotional", &["优惠", "折扣", "促销", "特价", "买一送一"]),
    ("urgent", &["紧急", "尽快", "重要", "立即处理", "尽快回复"]),
    (
        "work",
        &["会议", "报告", "项目", "deadline", "跟进", "工作计划"],
    ),
    ("notification", &["通知", "提醒", "更新", "系统", "账户"]),
    ("personal", &["家人", "朋友", "聚会", "周末", "生日"]),
];

/// Keywords registered for a single label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    label: String,
    keywords: Vec<String>,
    normalized: Vec<String>,
}

impl Rule {
    /// Builds a rule, dropping blank keywords and case-insensitive duplicates.
    pub fn new<I, S>(label: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept = Vec::new();
        let mut normalized: Vec<String> = Vec::new();

        for keyword in keywords {
            let keyword = keyword.into();
            if keyword.trim().is_empty() {
                continue;
            }
            let folded = normalize(&keyword);
            if normalized.contains(&folded) {
                continue;
            }
            normalized.push(folded);
            kept.push(keyword);
        }

        Self {
            label: label.into(),
            keywords: kept,
            normalized,
        }
    }

    /// The label this rule assigns.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Keywords as registered, in registration order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Pairs of (registered keyword, normalized keyword).
    pub(crate) fn normalized_keywords(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keywords
            .iter()
            .map(String::as_str)
            .zip(self.normalized.iter().map(String::as_str))
    }
}

/// An immutable, ordered collection of rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the built-in rule set.
    pub fn defaults() -> Self {
        DEFAULT_RULES
            .iter()
            .fold(Self::new(), |set, (label, keywords)| {
                set.with_rule(Rule::new(*label, keywords.iter().copied()))
            })
    }

    /// Returns a copy with `rule` added, replacing any rule for the same label.
    ///
    /// A replaced label keeps its position.
    pub fn with_rule(&self, rule: Rule) -> Self {
        let mut rules = self.rules.clone();
        match rules.iter_mut().find(|r| r.label == rule.label) {
            Some(existing) => *existing = rule,
            None => rules.push(rule),
        }
        Self { rules }
    }

    /// Iterates rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Looks up the rule for a label.
    pub fn get(&self, label: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.label == label)
    }

    /// Label names in registration order.
    pub fn labels(&self) -> Vec<String> {
        self.rules.iter().map(|r| r.label.clone()).collect()
    }

    /// Number of labels with a rule.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Runtime-editable registry handing out immutable snapshots.
#[derive(Debug)]
pub struct RuleRegistry {
    current: RwLock<Arc<RuleSet>>,
}

impl RuleRegistry {
    /// Creates a registry seeded with [`DEFAULT_RULES`].
    pub fn new() -> Self {
        Self::with_rules(RuleSet::defaults())
    }

    /// Creates a registry with no rules.
    pub fn empty() -> Self {
        Self::with_rules(RuleSet::new())
    }

    /// Creates a registry from an existing rule set.
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(rules)),
        }
    }

    /// Sets the keywords for `label`, replacing any previous keyword list.
    ///
    /// An empty keyword list is accepted and makes the label unreachable.
    /// A blank label is ignored, leaving the registry unchanged.
    pub fn add_rule<I, S>(&self, label: impl Into<String>, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let label = label.into();
        if label.trim().is_empty() {
            tracing::warn!("ignoring keyword rule with a blank label");
            return;
        }
        let rule = Rule::new(label, keywords);
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        let next = current.with_rule(rule);
        *current = Arc::new(next);
    }

    /// Returns the rule set as of now. Later edits do not affect it.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}
