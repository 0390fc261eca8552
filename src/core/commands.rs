//! # Single-shot commands
//!
//! The scriptable side of NoteType. Each command runs against the same
//! collaborators as the interactive session, writes its report to `out`,
//! and returns the first error it hits. Printing the error and choosing
//! the exit code is left to `main`.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use chrono::NaiveDate;
use log::info;

use crate::core::action::Collaborators;
use crate::core::error::StoreError;
use crate::core::store::{Collection, journal_id};
use crate::core::tags;
use crate::core::templates::{TemplateOrigin, template_variables};
use crate::core::theme::{THEMES, find_theme};

const RULE_WIDTH: usize = 70;

fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

/// Read lines until end of input or a line that is just `EOF` (any case).
pub fn read_until_eof(input: &mut dyn BufRead) -> io::Result<String> {
    let mut collected = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().eq_ignore_ascii_case("eof") {
            break;
        }
        collected.push_str(&line);
    }
    Ok(collected)
}

// ============================================================================
// Journal
// ============================================================================

/// Create today's entry, or append a timestamped section to it.
///
/// Without `entry` the text is read from `input`.
pub fn journal_entry(
    collab: &Collaborators,
    entry: Option<&str>,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), StoreError> {
    let now = collab.now();
    let id = journal_id(now.date_naive());
    let exists = collab.store.exists(Collection::Journal, &id);

    let content = match entry {
        Some(text) => text.to_string(),
        None => {
            writeln!(out, "\n📔 Daily Journal Entry")?;
            writeln!(out, "{}", rule('='))?;
            if exists {
                writeln!(out, "📝 Adding to today's entry...")?;
            } else {
                writeln!(out, "📝 Creating today's entry...")?;
            }
            writeln!(
                out,
                "\nWrite your thoughts (press Ctrl+D or type 'EOF' on a new line to finish):"
            )?;
            writeln!(out, "{}", rule('-'))?;
            let text = read_until_eof(input)?;
            writeln!(out, "{}", rule('-'))?;
            text
        }
    };

    if content.trim().is_empty() {
        return Err(StoreError::EmptyInput);
    }

    let time = now.format("%H:%M");
    if exists {
        collab
            .store
            .append(Collection::Journal, &id, &format!("### {}\n\n{}", time, content))?;
        writeln!(out, "\n✅ Added entry to today's journal ({})", id)?;
    } else {
        let body = format!(
            "# Daily Journal\n\n## {}\n\n### {}\n\n{}",
            now.format("%A, %B %-d, %Y"),
            time,
            content
        );
        collab.store.write(Collection::Journal, &id, &body)?;
        writeln!(out, "\n✅ Created today's journal entry ({})", id)?;
    }
    info!("Journal entry recorded for {}", id);
    writeln!(
        out,
        "📍 Location: {}",
        collab
            .store
            .location(Collection::Journal)
            .join(format!("{}.md", id))
            .display()
    )?;
    Ok(())
}

pub fn journal_view(collab: &Collaborators, out: &mut dyn Write) -> Result<(), StoreError> {
    let id = journal_id(collab.now().date_naive());
    let content = collab.store.read(Collection::Journal, &id)?;

    writeln!(out, "\n{}", rule('='))?;
    writeln!(out, "  📔 Today's Journal Entry ({})", id)?;
    writeln!(out, "{}\n", rule('='))?;
    writeln!(out, "{}\n", content)?;
    writeln!(out, "{}", rule('='))?;
    Ok(())
}

/// List journal entries newest first; `limit` 0 means all.
pub fn journal_list(
    collab: &Collaborators,
    limit: usize,
    out: &mut dyn Write,
) -> Result<(), StoreError> {
    let entries = collab.store.list(Collection::Journal)?;
    if entries.is_empty() {
        writeln!(
            out,
            "📝 No journal entries yet. Create your first entry with 'notetype journal'"
        )?;
        return Ok(());
    }

    let shown = if limit > 0 {
        limit.min(entries.len())
    } else {
        entries.len()
    };
    writeln!(
        out,
        "\n📚 Journal Entries (showing {} of {}):\n",
        shown,
        entries.len()
    )?;
    for entry in entries.iter().take(shown) {
        let display = NaiveDate::parse_from_str(&entry.id, "%Y-%m-%d")
            .map(|d| d.format("%a, %b %-d, %Y").to_string())
            .unwrap_or_else(|_| entry.id.clone());
        writeln!(
            out,
            "  📅 {} (last updated: {})",
            display,
            entry.last_modified.format("%H:%M")
        )?;
    }
    writeln!(
        out,
        "\n📍 Journal location: {}\n",
        collab.store.location(Collection::Journal).display()
    )?;
    Ok(())
}

// ============================================================================
// Notes
// ============================================================================

/// Create a note with a title header and today's date.
pub fn new_note(
    collab: &Collaborators,
    id: &str,
    title: &str,
    out: &mut dyn Write,
) -> Result<(), StoreError> {
    if collab.store.exists(Collection::Notes, id) {
        return Err(StoreError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("'{}' already exists", id),
        )));
    }
    let body = format!(
        "# {}\n<span style=\"opacity:0.5\">{}</span>\n---\n",
        title,
        collab.now().format("%Y-%m-%d")
    );
    collab.store.write(Collection::Notes, id, &body)?;
    writeln!(out, "✅ Created '{}.md'", id)?;
    Ok(())
}

/// Append to an existing note, optionally under an `Updated:` stamp.
pub fn update_note(
    collab: &Collaborators,
    id: &str,
    content: Option<&str>,
    timestamp: bool,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<(), StoreError> {
    if !collab.store.exists(Collection::Notes, id) {
        return Err(StoreError::NotFound(id.to_string()));
    }

    let text = match content {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => {
            writeln!(
                out,
                "\n✍️  Enter your update (press Ctrl+D or type 'EOF' on a new line to finish):"
            )?;
            writeln!(out, "{}", rule('-'))?;
            let text = read_until_eof(input)?;
            writeln!(out, "{}", rule('-'))?;
            text
        }
    };
    if text.trim().is_empty() {
        return Err(StoreError::EmptyInput);
    }

    let addition = if timestamp {
        format!(
            "---\n**Updated:** {}\n\n{}",
            collab.now().format("%Y-%m-%d %H:%M:%S"),
            text
        )
    } else {
        text
    };
    collab.store.append(Collection::Notes, id, &addition)?;
    writeln!(out, "\n✅ Successfully updated '{}.md'", id)?;
    Ok(())
}

pub fn delete_note(collab: &Collaborators, id: &str, out: &mut dyn Write) -> Result<(), StoreError> {
    collab.store.delete(Collection::Notes, id)?;
    writeln!(out, "✅ Deleted '{}.md'", id)?;
    Ok(())
}

// ============================================================================
// Tags
// ============================================================================

pub fn tags_list(collab: &Collaborators, out: &mut dyn Write) -> Result<(), StoreError> {
    let index = tags::index_all(collab.store.as_ref())?;
    if index.is_empty() {
        writeln!(
            out,
            "📝 No tags found. Add tags to your notes using #hashtag syntax"
        )?;
        return Ok(());
    }

    let sorted = tags::sorted_counts(&index);
    writeln!(out, "\n🏷️  All Tags ({} total):\n", sorted.len())?;
    for (tag, count) in &sorted {
        writeln!(out, "  #{:<20} ({})", tag, count)?;
    }
    writeln!(
        out,
        "\n💡 Use 'notetype tags show <tag>' to see entries with a specific tag"
    )?;
    Ok(())
}

pub fn tags_show(collab: &Collaborators, tag: &str, out: &mut dyn Write) -> Result<(), StoreError> {
    let tag = tag.trim_start_matches('#');
    let entries = tags::find_by_tag(collab.store.as_ref(), tag)?;
    if entries.is_empty() {
        writeln!(out, "📝 No entries found with tag #{}", tag)?;
        return Ok(());
    }

    writeln!(out, "\n📌 Found {} entry/entries with #{}:\n", entries.len(), tag)?;
    for entry in &entries {
        let marker = if entry.collection.is_journal() {
            " (journal)"
        } else {
            ""
        };
        writeln!(out, "  • {}{}", entry.id, marker)?;
    }
    writeln!(out)?;
    Ok(())
}

// ============================================================================
// Themes
// ============================================================================

pub fn theme_current(collab: &Collaborators, out: &mut dyn Write) -> Result<(), StoreError> {
    writeln!(out, "Current theme: {}", collab.themes.load().name)?;
    writeln!(out, "\nUse 'notetype theme list' to see all available themes")?;
    Ok(())
}

pub fn theme_list(collab: &Collaborators, out: &mut dyn Write) -> Result<(), StoreError> {
    let current = collab.themes.load();
    writeln!(out, "\n🎨 Available Themes:\n")?;
    for theme in THEMES {
        let indicator = if theme.key == current.key { "✓ " } else { "  " };
        writeln!(out, "{}{:<15} - {}", indicator, theme.key, theme.name)?;
        writeln!(out, "   Primary: {}, Accent: {}\n", theme.primary, theme.accent)?;
    }
    writeln!(out, "💡 Use 'notetype theme set <name>' to change theme")?;
    Ok(())
}

pub fn theme_set(collab: &Collaborators, key: &str, out: &mut dyn Write) -> Result<(), StoreError> {
    let theme = collab.themes.save(key)?;
    writeln!(out, "✅ Theme set to '{}'", theme.name)?;
    writeln!(out, "💡 Restart the TUI to see the changes")?;
    Ok(())
}

pub fn theme_preview(key: &str, out: &mut dyn Write) -> Result<(), StoreError> {
    let theme = find_theme(key).ok_or_else(|| {
        StoreError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unknown theme '{}'", key),
        ))
    })?;
    writeln!(out, "\n🎨 Theme Preview: {}\n", theme.name)?;
    let slots = [
        ("Primary", theme.primary),
        ("Secondary", theme.secondary),
        ("Accent", theme.accent),
        ("Success", theme.success),
        ("Warning", theme.warning),
        ("Error", theme.error),
        ("Text", theme.text),
        ("Muted", theme.muted),
        ("Background", theme.background),
        ("BackgroundAlt", theme.background_alt),
    ];
    for (label, hex) in slots {
        writeln!(out, "  {:<14} {} ████", format!("{}:", label), hex)?;
    }
    writeln!(out)?;
    Ok(())
}

// ============================================================================
// Templates
// ============================================================================

pub fn template_list(collab: &Collaborators, out: &mut dyn Write) -> Result<(), StoreError> {
    let all = collab.templates.list();

    writeln!(out, "\n📋 Built-in Templates:\n")?;
    for t in all.iter().filter(|t| t.origin == TemplateOrigin::Builtin) {
        writeln!(out, "  {:<15} - {}", t.name, t.description)?;
    }

    let custom: Vec<_> = all
        .iter()
        .filter(|t| t.origin == TemplateOrigin::Custom)
        .collect();
    if !custom.is_empty() {
        writeln!(out, "\n📝 Custom Templates:\n")?;
        for t in custom {
            writeln!(out, "  {}", t.name)?;
        }
    }

    writeln!(
        out,
        "\n💡 Usage: notetype template apply <template-name> <filename> <title>"
    )?;
    Ok(())
}

pub fn template_show(
    collab: &Collaborators,
    name: &str,
    out: &mut dyn Write,
) -> Result<(), StoreError> {
    let body = collab.templates.resolve(name)?;
    writeln!(out, "\n📄 Template: {}", name)?;
    writeln!(out, "{}", rule('='))?;
    writeln!(out, "{}", body)?;
    writeln!(out, "{}", rule('='))?;
    Ok(())
}

/// Render `name` with `title` and write the result as note `id`.
pub fn template_apply(
    collab: &Collaborators,
    name: &str,
    id: &str,
    title: &str,
    out: &mut dyn Write,
) -> Result<(), StoreError> {
    let vars = template_variables(collab.now(), title);
    let body = collab.templates.render(name, &vars)?;
    collab.store.write(Collection::Notes, id, &body)?;
    writeln!(out, "✅ Created '{}.md' from template '{}'", id, name)?;
    Ok(())
}

/// Copy the file at `source` into the custom templates as `name`.
pub fn template_add(
    collab: &Collaborators,
    name: &str,
    source: &Path,
    out: &mut dyn Write,
) -> Result<(), StoreError> {
    let body = fs::read_to_string(source)?;
    let path = collab.templates.save_custom(name, &body)?;
    writeln!(out, "✅ Saved template '{}' to {}", name, path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryStore, test_collaborators, today_id};

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_read_until_eof_marker() {
        let mut input: &[u8] = b"one\ntwo\neof\nignored\n";
        assert_eq!(read_until_eof(&mut input).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_read_until_end_of_input() {
        let mut input: &[u8] = b"last line without newline";
        assert_eq!(
            read_until_eof(&mut input).unwrap(),
            "last line without newline"
        );
    }

    #[test]
    fn test_journal_creates_structured_entry() {
        let collab = test_collaborators(MemoryStore::new());
        let mut out = Vec::new();
        journal_entry(&collab, Some("Today was good"), &mut &b""[..], &mut out).unwrap();

        let saved = collab.store.read(Collection::Journal, &today_id()).unwrap();
        assert_eq!(
            saved,
            "# Daily Journal\n\n## Friday, March 7, 2025\n\n### 09:05\n\nToday was good"
        );
        assert!(output(out).contains("Created today's journal entry (2025-03-07)"));
    }

    #[test]
    fn test_journal_appends_timestamped_section() {
        let store = MemoryStore::new();
        store.insert(Collection::Journal, &today_id(), "existing");
        let collab = test_collaborators(store);
        let mut out = Vec::new();
        journal_entry(&collab, Some("more"), &mut &b""[..], &mut out).unwrap();

        let saved = collab.store.read(Collection::Journal, &today_id()).unwrap();
        assert_eq!(saved, "existing\n\n### 09:05\n\nmore");
    }

    #[test]
    fn test_journal_reads_stdin_when_no_entry() {
        let collab = test_collaborators(MemoryStore::new());
        let mut input: &[u8] = b"from stdin\nEOF\n";
        let mut out = Vec::new();
        journal_entry(&collab, None, &mut input, &mut out).unwrap();
        let saved = collab.store.read(Collection::Journal, &today_id()).unwrap();
        assert!(saved.ends_with("from stdin\n"));
    }

    #[test]
    fn test_journal_blank_input_is_empty_input() {
        let collab = test_collaborators(MemoryStore::new());
        let mut input: &[u8] = b"   \nEOF\n";
        let err = journal_entry(&collab, None, &mut input, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, StoreError::EmptyInput));
        assert!(!collab.store.exists(Collection::Journal, &today_id()));
    }

    #[test]
    fn test_journal_list_limit() {
        let store = MemoryStore::new();
        for id in ["2025-03-05", "2025-03-06", "2025-03-07"] {
            store.insert(Collection::Journal, id, "x");
        }
        let collab = test_collaborators(store);
        let mut out = Vec::new();
        journal_list(&collab, 2, &mut out).unwrap();
        let text = output(out);
        assert!(text.contains("showing 2 of 3"));
        assert!(text.contains("Fri, Mar 7, 2025"));
        assert!(!text.contains("Wed, Mar 5, 2025"));
    }

    #[test]
    fn test_update_missing_note_is_not_found() {
        let collab = test_collaborators(MemoryStore::new());
        let err = update_note(&collab, "ghost", Some("x"), false, &mut &b""[..], &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(ref id) if id == "ghost"));
        assert!(!collab.store.exists(Collection::Notes, "ghost"));
    }

    #[test]
    fn test_update_with_timestamp() {
        let store = MemoryStore::new();
        store.insert(Collection::Notes, "ideas", "first");
        let collab = test_collaborators(store);
        update_note(&collab, "ideas", Some("second"), true, &mut &b""[..], &mut Vec::new())
            .unwrap();
        assert_eq!(
            collab.store.read(Collection::Notes, "ideas").unwrap(),
            "first\n\n---\n**Updated:** 2025-03-07 09:05:00\n\nsecond"
        );
    }

    #[test]
    fn test_new_note_refuses_overwrite() {
        let store = MemoryStore::new();
        store.insert(Collection::Notes, "taken", "keep me");
        let collab = test_collaborators(store);
        assert!(new_note(&collab, "taken", "T", &mut Vec::new()).is_err());
        assert_eq!(collab.store.read(Collection::Notes, "taken").unwrap(), "keep me");

        new_note(&collab, "fresh", "Fresh Start", &mut Vec::new()).unwrap();
        let body = collab.store.read(Collection::Notes, "fresh").unwrap();
        assert!(body.starts_with("# Fresh Start\n"));
        assert!(body.contains("2025-03-07"));
    }

    #[test]
    fn test_tags_list_output() {
        let store = MemoryStore::new();
        store.insert(Collection::Notes, "a", "#work #home");
        store.insert(Collection::Notes, "b", "#work");
        let collab = test_collaborators(store);
        let mut out = Vec::new();
        tags_list(&collab, &mut out).unwrap();
        let text = output(out);
        assert!(text.contains("All Tags (2 total)"));
        let work = text.find("#work").unwrap();
        let home = text.find("#home").unwrap();
        assert!(work < home);
    }

    #[test]
    fn test_theme_set_and_list_marks_current() {
        let collab = test_collaborators(MemoryStore::new());
        theme_set(&collab, "nord", &mut Vec::new()).unwrap();
        let mut out = Vec::new();
        theme_list(&collab, &mut out).unwrap();
        assert!(output(out).contains("✓ nord"));
    }

    #[test]
    fn test_theme_preview_unknown() {
        assert!(theme_preview("neon", &mut Vec::new()).is_err());
    }

    #[test]
    fn test_template_apply_writes_note() {
        let collab = test_collaborators(MemoryStore::new());
        template_apply(&collab, "idea", "rocket", "Rocket Boots", &mut Vec::new()).unwrap();
        let body = collab.store.read(Collection::Notes, "rocket").unwrap();
        assert!(body.starts_with("# Idea: Rocket Boots"));
    }

    #[test]
    fn test_template_apply_unknown_is_template_not_found() {
        let collab = test_collaborators(MemoryStore::new());
        let err = template_apply(&collab, "nope", "x", "X", &mut Vec::new()).unwrap_err();
        assert!(matches!(err, StoreError::TemplateNotFound(_)));
    }
}
