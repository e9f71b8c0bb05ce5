//! HTML output format for absence reports
//!
//! Self-contained document with embedded CSS: one section per comparison
//! with the group summary table, the test verdict, the conclusion and the
//! cumulative distribution tables.

use crate::hypothesis::TestVerdict;
use crate::report::{AbsenceReport, ComparisonOutcome, ComparisonReport};
use crate::summary::GroupSummary;

/// HTML output formatter
#[derive(Debug)]
pub struct HtmlOutput<'a> {
    report: &'a AbsenceReport,
    include_ecdf: bool,
}

impl<'a> HtmlOutput<'a> {
    pub fn new(report: &'a AbsenceReport) -> Self {
        Self {
            report,
            include_ecdf: true,
        }
    }

    /// Leave out the cumulative distribution tables
    pub fn without_ecdf(mut self) -> Self {
        self.include_ecdf = false;
        self
    }

    /// Escape HTML special characters to prevent XSS
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Generate embedded CSS styles
    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2, h3 {
            color: #333;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        td.num {
            font-family: monospace;
            text-align: right;
        }
        .claim {
            font-style: italic;
            color: #555;
        }
        .verdict-table th {
            background-color: #5cb85c;
        }
        .conclusion {
            padding: 12px;
            border-left: 4px solid #4a90d9;
            background-color: white;
            margin-bottom: 20px;
        }
        .rejected {
            border-left-color: #cc0000;
        }
        .failed {
            padding: 12px;
            border-left: 4px solid #f0ad4e;
            background-color: #fcf8e3;
            margin-bottom: 20px;
        }
        .warning {
            color: #8a6d3b;
        }
        .ecdf {
            display: inline-block;
            vertical-align: top;
            width: 45%;
            margin-right: 4%;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
    }

    /// Generate complete HTML document
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");

        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str("    <title>Sick-Leave Absence Report</title>\n");
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");

        html.push_str("<body>\n");
        html.push_str("    <h1>Sick-Leave Absence Report</h1>\n");
        html.push_str(&format!(
            "    <p>{} records, {} with more than {} missed work days. Significance level {}, alternative {}.</p>\n",
            self.report.records,
            self.report.eligible,
            self.report.config.min_work_days,
            self.report.config.hypothesis.alpha,
            self.report.config.hypothesis.alternative
        ));

        for comparison in &self.report.comparisons {
            html.push_str(&self.render_comparison(comparison));
        }

        html.push_str("    <div class=\"footer\">\n");
        html.push_str(&format!(
            "        Generated by sickday {}\n",
            env!("CARGO_PKG_VERSION")
        ));
        html.push_str("    </div>\n");

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }

    fn render_comparison(&self, comparison: &ComparisonReport) -> String {
        let mut html = String::new();

        html.push_str(&format!(
            "    <h2>{}</h2>\n",
            Self::escape_html(&comparison.title)
        ));
        html.push_str(&format!(
            "    <p class=\"claim\">{}</p>\n",
            Self::escape_html(&comparison.claim)
        ));

        if !comparison.groups.is_empty() {
            html.push_str(&Self::render_summary_table(&comparison.groups));
        }

        match &comparison.outcome {
            ComparisonOutcome::Completed {
                verdict,
                conclusion,
            } => {
                html.push_str(&Self::render_verdict(verdict));
                let class = if verdict.reject_null() {
                    "conclusion rejected"
                } else {
                    "conclusion"
                };
                html.push_str(&format!(
                    "    <div class=\"{}\">{}</div>\n",
                    class,
                    Self::escape_html(conclusion)
                ));
            }
            ComparisonOutcome::Failed { error, message } => {
                html.push_str(&format!(
                    "    <div class=\"failed\"><strong>Comparison not performed ({})</strong><br>{}</div>\n",
                    Self::escape_html(error),
                    Self::escape_html(message)
                ));
            }
        }

        if self.include_ecdf && comparison.groups.iter().any(|g| !g.ecdf.is_empty()) {
            html.push_str("    <h3>Cumulative distribution</h3>\n");
            for group in &comparison.groups {
                html.push_str(&Self::render_ecdf(group));
            }
        }

        html
    }

    fn render_summary_table(groups: &[GroupSummary]) -> String {
        let mut html = String::new();

        html.push_str("    <table>\n");
        html.push_str("        <tr><th>Group</th><th>n</th><th>Mean</th><th>Std dev</th><th>Min</th><th>Q1</th><th>Median</th><th>Q3</th><th>Max</th></tr>\n");

        for group in groups {
            html.push_str(&format!(
                "        <tr><td>{}</td><td class=\"num\">{}</td>",
                Self::escape_html(&group.label),
                group.n
            ));
            match &group.stats {
                Some(s) => {
                    for value in [s.mean, s.std_dev, s.min, s.q1, s.median, s.q3, s.max] {
                        html.push_str(&format!("<td class=\"num\">{:.2}</td>", value));
                    }
                }
                None => html.push_str(&"<td></td>".repeat(7)),
            }
            html.push_str("</tr>\n");
        }

        html.push_str("    </table>\n");
        html
    }

    fn render_verdict(verdict: &TestVerdict) -> String {
        let mut html = String::new();

        html.push_str("    <table class=\"verdict-table\">\n");
        html.push_str("        <tr><th>Test</th><th>Statistic</th><th>p-value</th><th>Alpha</th><th>Decision</th></tr>\n");

        let statistic = match verdict.df {
            Some(df) => format!("{:.3} (df={:.2})", verdict.statistic, df),
            None => format!("{:.3}", verdict.statistic),
        };
        let decision = if verdict.reject_null() {
            "reject H0"
        } else {
            "keep H0"
        };
        html.push_str(&format!(
            "        <tr><td>{} ({})</td><td class=\"num\">{}</td><td class=\"num\">{:.5}</td><td class=\"num\">{}</td><td>{}</td></tr>\n",
            verdict.procedure, verdict.test, statistic, verdict.p_value, verdict.alpha, decision
        ));
        html.push_str("    </table>\n");

        for warning in &verdict.warnings {
            html.push_str(&format!(
                "    <p class=\"warning\">{}</p>\n",
                Self::escape_html(&warning.to_string())
            ));
        }

        html
    }

    fn render_ecdf(group: &GroupSummary) -> String {
        let mut html = String::new();

        html.push_str("    <div class=\"ecdf\">\n");
        html.push_str(&format!(
            "    <table>\n        <tr><th>{} (work days)</th><th>Cumulative share</th></tr>\n",
            Self::escape_html(&group.label)
        ));
        for point in &group.ecdf {
            html.push_str(&format!(
                "        <tr><td class=\"num\">{}</td><td class=\"num\">{:.3}</td></tr>\n",
                point.value, point.cumulative
            ));
        }
        html.push_str("    </table>\n");
        html.push_str("    </div>\n");

        html
    }
}
