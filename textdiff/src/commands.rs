//! Headless subcommands.
//!
//! Each command loads the saved workspace, applies one operation, and saves
//! again when the operation changed anything. Output goes to stdout; logs go to
//! stderr.

use std::io::{Read, Write};
use std::path::Path;

use textdiff_core::db::Connection;
use textdiff_core::{render_inline, Comparison, DiffCache, DiffGroup, DiffOptions, Source, TextSet};

use crate::app;
use crate::cli::Command;
use crate::workspace;

pub async fn run(command: Command, conn: &Connection, cache_capacity: usize) -> std::io::Result<()> {
    let mut store = workspace::load(conn).await?;

    match command {
        Command::Add { name, file, transcribed } => {
            let content = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let source = if transcribed { Source::Transcribed } else { Source::Manual };
            let text_set = validated_text_set(&name, &content, source)?;
            let id = text_set.id().clone();
            store.active_mut().push_text_set(text_set);
            tracing::info!(text_set_id = %id, group = store.active().name(), "text set added");
            workspace::save(conn, &store).await?;
            println!("{id}");
        }
        Command::Import { path } => {
            let payload = std::fs::read_to_string(&path)?;
            store.import_json(&payload).map_err(std::io::Error::other)?;
            tracing::info!(path = %path.display(), groups = store.len(), "workspace imported");
            workspace::save(conn, &store).await?;
        }
        Command::Export { path } => {
            let payload = store.export_json().map_err(std::io::Error::other)?;
            write_export(&path, &payload)?;
            tracing::info!(path = %path.display(), groups = store.len(), "workspace exported");
        }
        Command::Show { ignore_punctuation, no_diff, all } => {
            let options = DiffOptions { ignore_punctuation, diff_enabled: !no_diff };
            let mut group = store.active().clone();
            if all {
                group.select_all();
            }
            let mut cache = DiffCache::new(cache_capacity);
            let mut out = std::io::stdout().lock();
            write_comparison(&mut out, &group, cache.compare(&group, options))?;
        }
    }

    Ok(())
}

fn validated_text_set(name: &str, content: &str, source: Source) -> std::io::Result<TextSet> {
    app::validated_text_set(name, content, source).ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "name and content must not be empty")
    })
}

fn write_export(path: &Path, payload: &str) -> std::io::Result<()> {
    if path.as_os_str() == "-" {
        let mut out = std::io::stdout().lock();
        out.write_all(payload.as_bytes())?;
        return out.write_all(b"\n");
    }
    std::fs::write(path, payload)
}

fn write_comparison(out: &mut impl Write, group: &DiffGroup, comparison: Option<Comparison<'_>>) -> std::io::Result<()> {
    writeln!(out, "# {}", group.name())?;
    let Some(cmp) = comparison else {
        return writeln!(out, "(no text sets selected)");
    };

    writeln!(out, "base: {} [{}]", cmp.base.name(), cmp.base.source().label())?;
    writeln!(out, "  {}", cmp.base.content())?;
    for candidate in &cmp.candidates {
        let s = candidate.summary;
        if cmp.options.diff_enabled {
            writeln!(
                out,
                "{} [{}]  ={} +{} -{}",
                candidate.text_set.name(),
                candidate.text_set.source().label(),
                s.equal,
                s.inserted,
                s.deleted,
            )?;
            writeln!(out, "  {}", render_inline(&candidate.segments))?;
        } else {
            writeln!(out, "{} [{}]", candidate.text_set.name(), candidate.text_set.source().label())?;
            writeln!(out, "  {}", candidate.text_set.content())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(group: &DiffGroup, options: DiffOptions) -> String {
        let mut cache = DiffCache::default();
        let mut out = Vec::new();
        write_comparison(&mut out, group, cache.compare(group, options)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert!(validated_text_set("  ", "text", Source::Manual).is_err());
        assert!(validated_text_set("name", "\n\t", Source::Manual).is_err());
        let ok = validated_text_set("  take 1 ", " hello \n", Source::Transcribed).unwrap();
        assert_eq!(ok.name(), "take 1");
        assert_eq!(ok.content(), "hello");
    }

    #[test]
    fn show_prints_inline_diff() {
        let mut group = DiffGroup::new("Interviews");
        group.add_text_set("A", "the cat sat", Source::Manual);
        group.add_text_set("B", "the dog sat", Source::Transcribed);
        group.select_all();

        let text = rendered(&group, DiffOptions::default());
        assert!(text.contains("base: A [manual]"));
        assert!(text.contains("B [transcribed]  =2 +1 -1"));
        assert!(text.contains("the [-cat-] {+dog+} sat"));
    }

    #[test]
    fn show_without_diff_prints_content() {
        let mut group = DiffGroup::new("g");
        group.add_text_set("A", "one", Source::Manual);
        group.add_text_set("B", "two", Source::Manual);
        group.select_all();

        let text = rendered(&group, DiffOptions { diff_enabled: false, ..DiffOptions::default() });
        assert!(text.contains("B [manual]\n  two"));
        assert!(!text.contains("{+"));
    }

    #[test]
    fn show_with_nothing_selected() {
        let group = DiffGroup::new("g");
        assert!(rendered(&group, DiffOptions::default()).contains("(no text sets selected)"));
    }
}
