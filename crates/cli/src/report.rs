//! Batch resolution of a change set and its text and JSON renderings.

use std::io::{self, Write};

use owners::{Attribution, DeclarationSource, OwnersError, Resolution, Resolver};
use serde::Serialize;

/// Outcome of resolving one changed path.
#[derive(Debug)]
pub struct PathReport {
    /// Path as it appeared in the change set.
    pub path: String,
    /// Owners with provenance, or the error that aborted this path.
    pub outcome: Result<Resolution, OwnersError>,
}

impl PathReport {
    /// Returns `true` when the path could not be resolved.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }
}

/// Resolves every path independently, keeping the change-set order.
///
/// A failing path never prevents the remaining paths from resolving.
#[cfg(feature = "parallel")]
pub fn resolve_all<S>(resolver: &Resolver<S>, paths: &[String]) -> Vec<PathReport>
where
    S: DeclarationSource + Sync,
{
    use rayon::prelude::*;

    paths
        .par_iter()
        .map(|path| resolve_one(resolver, path))
        .collect()
}

/// Resolves every path independently, keeping the change-set order.
///
/// A failing path never prevents the remaining paths from resolving.
#[cfg(not(feature = "parallel"))]
pub fn resolve_all<S>(resolver: &Resolver<S>, paths: &[String]) -> Vec<PathReport>
where
    S: DeclarationSource,
{
    paths.iter().map(|path| resolve_one(resolver, path)).collect()
}

fn resolve_one<S: DeclarationSource>(resolver: &Resolver<S>, path: &str) -> PathReport {
    PathReport {
        path: path.to_owned(),
        outcome: resolver.resolve_detailed(path),
    }
}

/// Controls how reports are written.
#[derive(Clone, Copy, Debug)]
pub struct Renderer<'a> {
    /// Include the declaration behind each owner list.
    pub explain: bool,
    /// Declaration file name used when naming declarations.
    pub declaration_file: &'a str,
}

impl Renderer<'_> {
    /// Writes one line per resolved path to `out` and one `<path>: <error>`
    /// line per failure to `err`.
    ///
    /// Returns the number of failed paths.
    pub fn text<Out, Err>(
        &self,
        reports: &[PathReport],
        out: &mut Out,
        err: &mut Err,
    ) -> io::Result<usize>
    where
        Out: Write + ?Sized,
        Err: Write + ?Sized,
    {
        let mut failures = 0;
        for report in reports {
            match &report.outcome {
                Ok(resolution) => {
                    writeln!(
                        out,
                        "{} {} {}",
                        report.path,
                        bracketed(resolution.required.as_ref()),
                        bracketed(resolution.optional.as_ref()),
                    )?;
                    if self.explain {
                        self.write_explanation(out, "required", resolution.required.as_ref())?;
                        self.write_explanation(out, "optional", resolution.optional.as_ref())?;
                    }
                }
                Err(error) => {
                    failures += 1;
                    writeln!(err, "{}: {error}", report.path)?;
                }
            }
        }
        Ok(failures)
    }

    /// Writes all reports as one pretty-printed JSON array to `out`.
    ///
    /// Failures are embedded as `{ "path", "error" }` entries and also
    /// reported on `err`. Returns the number of failed paths.
    pub fn json<Out, Err>(
        &self,
        reports: &[PathReport],
        out: &mut Out,
        err: &mut Err,
    ) -> io::Result<usize>
    where
        Out: Write + ?Sized,
        Err: Write + ?Sized,
    {
        let mut failures = 0;
        let mut entries = Vec::with_capacity(reports.len());
        for report in reports {
            let entry = match &report.outcome {
                Ok(resolution) => JsonEntry::Resolved {
                    path: &report.path,
                    required: owners_of(resolution.required.as_ref()),
                    optional: owners_of(resolution.optional.as_ref()),
                    explain: self.explain.then_some(resolution),
                },
                Err(error) => {
                    failures += 1;
                    writeln!(err, "{}: {error}", report.path)?;
                    JsonEntry::Failed {
                        path: &report.path,
                        error: error.to_string(),
                    }
                }
            };
            entries.push(entry);
        }

        serde_json::to_writer_pretty(&mut *out, &entries).map_err(io::Error::other)?;
        writeln!(out)?;
        Ok(failures)
    }

    fn write_explanation<Out: Write + ?Sized>(
        &self,
        out: &mut Out,
        label: &str,
        attribution: Option<&Attribution>,
    ) -> io::Result<()> {
        let Some(attribution) = attribution else {
            return Ok(());
        };
        if attribution.owners.is_empty() {
            return Ok(());
        }
        writeln!(
            out,
            "  {label}: {} (from {}: {}, approvals {})",
            attribution.owners.join(" "),
            self.declaration_name(&attribution.directory),
            attribution.pattern,
            attribution.approvals,
        )
    }

    fn declaration_name(&self, directory: &str) -> String {
        if directory.is_empty() {
            self.declaration_file.to_owned()
        } else {
            format!("{directory}/{}", self.declaration_file)
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonEntry<'a> {
    Resolved {
        path: &'a str,
        required: &'a [String],
        optional: &'a [String],
        #[serde(skip_serializing_if = "Option::is_none")]
        explain: Option<&'a Resolution>,
    },
    Failed {
        path: &'a str,
        error: String,
    },
}

fn owners_of(attribution: Option<&Attribution>) -> &[String] {
    attribution
        .map(|a| a.owners.as_slice())
        .unwrap_or_default()
}

fn bracketed(attribution: Option<&Attribution>) -> String {
    format!("[{}]", owners_of(attribution).join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use owners::MemorySource;

    fn resolver() -> Resolver<MemorySource> {
        Resolver::new(
            MemorySource::new()
                .with_file("", "[Core][2]\n*.go @root\n^[optional]\n*.go @watcher\n")
                .with_file("a", "a.go @a @b\n")
                .with_file("broken", "[oops\n"),
        )
    }

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    const PLAIN: Renderer<'static> = Renderer {
        explain: false,
        declaration_file: "OWNERS",
    };

    #[test]
    fn resolve_all_preserves_order_and_isolates_failures() {
        let reports = resolve_all(&resolver(), &paths(&["a/a.go", "broken/x.go", "main.go"]));
        let order: Vec<_> = reports.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(order, ["a/a.go", "broken/x.go", "main.go"]);
        assert!(!reports[0].is_failure());
        assert!(reports[1].is_failure());
        assert!(!reports[2].is_failure());
    }

    #[test]
    fn text_lists_required_then_optional() {
        let reports = resolve_all(&resolver(), &paths(&["main.go", "a/a.go", "README"]));
        let mut out = Vec::new();
        let mut err = Vec::new();
        let failures = PLAIN.text(&reports, &mut out, &mut err).unwrap();

        assert_eq!(failures, 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "main.go [@root] [@watcher]\na/a.go [@a @b] []\nREADME [] []\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn text_reports_failures_on_stderr() {
        let reports = resolve_all(&resolver(), &paths(&["broken/x.go", "main.go"]));
        let mut out = Vec::new();
        let mut err = Vec::new();
        let failures = PLAIN.text(&reports, &mut out, &mut err).unwrap();

        assert_eq!(failures, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "main.go [@root] [@watcher]\n");
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("broken/x.go: malformed declaration 'broken/OWNERS'"), "{err}");
    }

    #[test]
    fn explain_names_declaration_pattern_and_approvals() {
        let renderer = Renderer {
            explain: true,
            declaration_file: "CODENOTIFY",
        };
        let reports = resolve_all(&resolver(), &paths(&["main.go", "a/a.go"]));
        let mut out = Vec::new();
        renderer.text(&reports, &mut out, &mut io::sink()).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "main.go [@root] [@watcher]\n\
             \x20 required: @root (from CODENOTIFY: *.go, approvals 2)\n\
             \x20 optional: @watcher (from CODENOTIFY: *.go, approvals 1)\n\
             a/a.go [@a @b] []\n\
             \x20 required: @a @b (from a/CODENOTIFY: a.go, approvals 1)\n"
        );
    }

    #[test]
    fn json_embeds_failures() {
        let reports = resolve_all(&resolver(), &paths(&["a/a.go", "broken/x.go"]));
        let mut out = Vec::new();
        let mut err = Vec::new();
        let failures = PLAIN.json(&reports, &mut out, &mut err).unwrap();
        assert_eq!(failures, 1);
        assert!(!err.is_empty());

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value[0],
            serde_json::json!({"path": "a/a.go", "required": ["@a", "@b"], "optional": []})
        );
        assert_eq!(value[1]["path"], "broken/x.go");
        assert!(value[1]["error"].as_str().unwrap().contains("line 1"));
    }

    #[test]
    fn json_explain_includes_attribution() {
        let renderer = Renderer {
            explain: true,
            declaration_file: "OWNERS",
        };
        let reports = resolve_all(&resolver(), &paths(&["main.go"]));
        let mut out = Vec::new();
        renderer.json(&reports, &mut out, &mut io::sink()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let required = &value[0]["explain"]["required"];
        assert_eq!(required["directory"], "");
        assert_eq!(required["section"], "Core");
        assert_eq!(required["approvals"], 2);
        assert_eq!(required["pattern"], "*.go");
        assert!(value[0]["explain"]["optional"].is_object());
    }
}
