//! # Templates
//!
//! Named note bodies with `{{placeholder}}` tokens filled in at creation
//! time. Six templates are built in; anything else is looked up as
//! `<templates_dir>/<name>.md`. Built-ins win on a name clash.
//!
//! Substitution is a single literal pass: `{{key}}` becomes `vars[key]`,
//! unknown keys are left as they are, and substituted values are never
//! scanned again.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use log::{debug, info};

use crate::core::error::{StoreError, classify};
use crate::core::paths;
use crate::core::store::EXTENSION;

pub struct BuiltinTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub body: &'static str,
}

/// Where a listed template comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOrigin {
    Builtin,
    Custom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateInfo {
    pub name: String,
    pub description: String,
    pub origin: TemplateOrigin,
}

pub const BUILTIN_TEMPLATES: &[BuiltinTemplate] = &[
    BuiltinTemplate {
        name: "daily",
        description: "Daily journal with morning/evening sections",
        body: "# Daily Journal - {{date}}

## Morning 🌅
**Mood:**
**Energy Level:** /10

**Today's Intentions:**
-
-
-

**Grateful for:**
-
-
-

## Evening 🌙
**Accomplishments:**
-
-
-

**Lessons Learned:**


**Tomorrow's Focus:**
-
-
-

**Rating:** /10

---
#journal #daily
",
    },
    BuiltinTemplate {
        name: "meeting",
        description: "Meeting notes with agenda and action items",
        body: "# Meeting Notes - {{date}}

**Date:** {{datetime}}
**Attendees:**

## Agenda
1.
2.
3.

## Discussion


## Decisions Made
-
-

## Action Items
- [ ]
- [ ]
- [ ]

## Next Steps


---
#meeting #work
",
    },
    BuiltinTemplate {
        name: "project",
        description: "Project planning template",
        body: "# Project: {{title}}

**Start Date:** {{date}}
**Status:** Planning

## Overview


## Goals
1.
2.
3.

## Timeline
- **Week 1:**
- **Week 2:**
- **Week 3:**
- **Week 4:**

## Resources Needed
-
-

## Success Metrics


## Notes


---
#project #planning
",
    },
    BuiltinTemplate {
        name: "weekly",
        description: "Weekly review and reflection",
        body: "# Weekly Review - Week of {{date}}

## 📊 Overview


## ✅ Wins
-
-
-

## 📈 Progress on Goals


## 🤔 Challenges


## 💡 Lessons Learned


## 🎯 Next Week's Focus
1.
2.
3.

---
#weekly-review #reflection
",
    },
    BuiltinTemplate {
        name: "idea",
        description: "Capture and develop ideas",
        body: "# Idea: {{title}}

**Date:** {{date}}

## The Idea


## Why This Matters


## Next Steps
- [ ]
- [ ]
- [ ]

## Resources


## Notes


---
#ideas #brainstorm
",
    },
    BuiltinTemplate {
        name: "grateful",
        description: "Gratitude journal entry",
        body: "# Gratitude - {{date}}

Today I'm grateful for:

1.
2.
3.

## Why?


## Reflection


---
#gratitude #reflection
",
    },
];

pub fn builtin(name: &str) -> Option<&'static BuiltinTemplate> {
    BUILTIN_TEMPLATES.iter().find(|t| t.name == name)
}

/// The variables every render gets, computed from one instant.
pub fn template_variables(now: DateTime<Local>, title: &str) -> HashMap<String, String> {
    HashMap::from([
        ("date".to_string(), now.format("%Y-%m-%d").to_string()),
        ("datetime".to_string(), now.format("%Y-%m-%d %H:%M").to_string()),
        ("time".to_string(), now.format("%H:%M").to_string()),
        ("title".to_string(), title.to_string()),
        ("year".to_string(), now.format("%Y").to_string()),
        ("month".to_string(), now.format("%B").to_string()),
        ("day".to_string(), now.format("%A").to_string()),
    ])
}

/// Replace every `{{key}}` whose key is in `vars`.
pub fn substitute(body: &str, vars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find("}}") {
            Some(end) => match vars.get(&after_open[..end]) {
                Some(value) => {
                    out.push_str(value);
                    rest = &after_open[end + 2..];
                }
                None => {
                    // Unknown key: keep the braces and move past them only,
                    // so a later `{{` inside this span is still seen.
                    out.push_str("{{");
                    rest = after_open;
                }
            },
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Resolves template names to bodies and renders them.
pub struct TemplateEngine {
    custom_dir: Option<PathBuf>,
}

impl TemplateEngine {
    pub fn new(custom_dir: Option<PathBuf>) -> Self {
        Self { custom_dir }
    }

    /// Engine with only the built-in catalog.
    pub fn builtin_only() -> Self {
        Self { custom_dir: None }
    }

    fn custom_path(&self, name: &str) -> Option<PathBuf> {
        self.custom_dir
            .as_ref()
            .map(|d| d.join(format!("{}.{}", name, EXTENSION)))
    }

    /// Raw body for `name`: built-in first, then the custom directory.
    pub fn resolve(&self, name: &str) -> Result<String, StoreError> {
        if let Some(t) = builtin(name) {
            return Ok(t.body.to_string());
        }
        let path = self
            .custom_path(name)
            .ok_or_else(|| StoreError::TemplateNotFound(name.to_string()))?;
        fs::read_to_string(&path).map_err(|e| match classify(e, name) {
            StoreError::NotFound(_) => StoreError::TemplateNotFound(name.to_string()),
            other => other,
        })
    }

    pub fn render(
        &self,
        name: &str,
        vars: &HashMap<String, String>,
    ) -> Result<String, StoreError> {
        let body = self.resolve(name)?;
        debug!("Rendering template '{}' ({} bytes)", name, body.len());
        Ok(substitute(&body, vars))
    }

    /// Built-in templates in catalog order, then custom ones by name.
    pub fn list(&self) -> Vec<TemplateInfo> {
        let mut out: Vec<TemplateInfo> = BUILTIN_TEMPLATES
            .iter()
            .map(|t| TemplateInfo {
                name: t.name.to_string(),
                description: t.description.to_string(),
                origin: TemplateOrigin::Builtin,
            })
            .collect();
        out.extend(self.custom_names().into_iter().map(|name| TemplateInfo {
            name,
            description: "Custom template".to_string(),
            origin: TemplateOrigin::Custom,
        }));
        out
    }

    fn custom_names(&self) -> Vec<String> {
        let Some(dir) = &self.custom_dir else {
            return Vec::new();
        };
        let Ok(read) = fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = read
            .filter_map(|res| res.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == EXTENSION))
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .filter(|name| builtin(name).is_none())
            .collect();
        names.sort();
        names
    }

    /// Store a custom template body under `name`.
    pub fn save_custom(&self, name: &str, body: &str) -> Result<PathBuf, StoreError> {
        let (Some(dir), Some(path)) = (&self.custom_dir, self.custom_path(name)) else {
            return Err(StoreError::Io(std::io::Error::other(
                "no templates directory configured",
            )));
        };
        if body.trim().is_empty() {
            return Err(StoreError::EmptyInput);
        }
        paths::ensure_dir(dir)?;
        fs::write(&path, body)?;
        info!("Saved custom template '{}' to {}", name, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 7, 9, 5, 0).unwrap()
    }

    fn vars() -> HashMap<String, String> {
        template_variables(fixed_now(), "Launch")
    }

    #[test]
    fn test_variables_for_fixed_instant() {
        let v = vars();
        assert_eq!(v["date"], "2025-03-07");
        assert_eq!(v["datetime"], "2025-03-07 09:05");
        assert_eq!(v["time"], "09:05");
        assert_eq!(v["year"], "2025");
        assert_eq!(v["month"], "March");
        assert_eq!(v["day"], "Friday");
        assert_eq!(v["title"], "Launch");
    }

    #[test]
    fn test_substitute_replaces_every_occurrence() {
        let out = substitute("{{date}} and {{date}}", &vars());
        assert_eq!(out, "2025-03-07 and 2025-03-07");
    }

    #[test]
    fn test_unknown_placeholder_left_verbatim() {
        let out = substitute("Hi {{who}} on {{date}}", &vars());
        assert_eq!(out, "Hi {{who}} on 2025-03-07");
    }

    #[test]
    fn test_substitution_is_not_recursive() {
        let mut v = HashMap::new();
        v.insert("a".to_string(), "{{b}}".to_string());
        v.insert("b".to_string(), "boom".to_string());
        assert_eq!(substitute("{{a}}", &v), "{{b}}");
    }

    #[test]
    fn test_unclosed_braces_untouched() {
        assert_eq!(substitute("start {{date", &vars()), "start {{date");
    }

    #[test]
    fn test_meeting_template_fully_resolved() {
        let engine = TemplateEngine::builtin_only();
        let out = engine.render("meeting", &vars()).unwrap();
        assert!(out.starts_with("# Meeting Notes - 2025-03-07"));
        assert!(out.contains("**Date:** 2025-03-07 09:05"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_every_builtin_resolves_without_leftovers() {
        let engine = TemplateEngine::builtin_only();
        for t in BUILTIN_TEMPLATES {
            let out = engine.render(t.name, &vars()).unwrap();
            assert!(!out.contains("{{"), "{} left a placeholder", t.name);
        }
    }

    #[test]
    fn test_unknown_template_is_template_not_found() {
        let engine = TemplateEngine::builtin_only();
        assert!(matches!(
            engine.resolve("nope"),
            Err(StoreError::TemplateNotFound(ref n)) if n == "nope"
        ));
    }

    #[test]
    fn test_custom_template_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = TemplateEngine::new(Some(tmp.path().to_path_buf()));
        engine.save_custom("standup", "# Standup {{date}}\n").unwrap();

        let out = engine.render("standup", &vars()).unwrap();
        assert_eq!(out, "# Standup 2025-03-07\n");

        let listed = engine.list();
        assert_eq!(listed.len(), BUILTIN_TEMPLATES.len() + 1);
        let last = listed.last().unwrap();
        assert_eq!(last.name, "standup");
        assert_eq!(last.origin, TemplateOrigin::Custom);
    }

    #[test]
    fn test_custom_cannot_shadow_builtin() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("daily.md"), "mine").unwrap();
        let engine = TemplateEngine::new(Some(tmp.path().to_path_buf()));
        assert!(engine.resolve("daily").unwrap().starts_with("# Daily Journal"));
        assert_eq!(engine.list().len(), BUILTIN_TEMPLATES.len());
    }

    #[test]
    fn test_missing_custom_dir_lists_builtins_only() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = TemplateEngine::new(Some(tmp.path().join("absent")));
        assert_eq!(engine.list().len(), BUILTIN_TEMPLATES.len());
    }

    #[test]
    fn test_save_custom_rejects_blank_body() {
        let tmp = tempfile::tempdir().unwrap();
        let engine = TemplateEngine::new(Some(tmp.path().to_path_buf()));
        assert!(matches!(
            engine.save_custom("blank", "  \n"),
            Err(StoreError::EmptyInput)
        ));
    }
}
