//! Ad wiring vs. the app's declared ad flag.

use std::sync::LazyLock;

use regex::Regex;

use super::Checker;
use crate::{
    core::{
        CheckContext,
        patterns::{LinePattern, report_capped, scan},
        suppression::active_lines,
    },
    findings::{Category, Finding, Findings, Severity},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Ads;

const MAX_REPORTED: usize = 3;

static AD_SERVICE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bI?AdService\b").unwrap());

static AD_REFERENCES: LazyLock<Vec<LinePattern>> = LazyLock::new(|| {
    vec![
        LinePattern::new(r"\bI?AdService\b", Severity::Warn, "ad service"),
        LinePattern::new(r"\bAdMob\b", Severity::Warn, "AdMob"),
        LinePattern::new(r"\bMobileAds\b", Severity::Warn, "MobileAds SDK"),
        LinePattern::new(
            r"\b(?:Banner|Interstitial|Rewarded)Ad\w*\b",
            Severity::Warn,
            "ad unit",
        ),
    ]
});

impl Checker for Ads {
    fn category(&self) -> Category {
        Category::Ads
    }

    fn check(&self, ctx: &CheckContext) -> Vec<Finding> {
        let mut sink = Findings::new(self.category());

        if ctx.app.is_ad_supported {
            let wired = ctx.shared_files.iter().any(|file| {
                active_lines(file, self.category()).any(|(_, line)| AD_SERVICE.is_match(line))
            });
            if wired {
                sink.pass("Ad service referenced from shared code");
            } else {
                sink.fail(format!(
                    "{} is ad-supported but shared code references no ad service",
                    ctx.app.name
                ));
            }
            return sink.into_vec();
        }

        let files = ctx.code_files().chain(ctx.view_files.iter());
        let mut offenders = Vec::new();
        let mut last_line = None;
        for m in scan(files, &AD_REFERENCES, self.category()) {
            // One finding per line, even when several patterns hit it.
            let line = (m.file.relative_path.as_str(), m.index);
            if last_line == Some(line) {
                continue;
            }
            last_line = Some(line);
            offenders.push((
                Some(m.location()),
                format!(
                    "{} is not ad-supported but references {}",
                    ctx.app.name, m.pattern.message
                ),
            ));
        }

        let clean = offenders.is_empty();
        report_capped(&mut sink, Severity::Warn, offenders, MAX_REPORTED, |n| {
            format!("... and {} more ad references", n)
        });
        if clean {
            sink.pass("No ad references in an app without ads");
        }
        sink.into_vec()
    }
}
