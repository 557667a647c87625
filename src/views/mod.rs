//! HTML rendering of the dashboard page

pub mod charts;
pub mod pages;

use std::fmt::Write;

use crate::constants::{APP_TITLE, SIDEBAR_TITLE};
use crate::format::escape_html;

/// The four report views, selected by the `page` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    ExecutiveSummary,
    KeyDriverAnalysis,
    ModelInterpretation,
    ActionableInsights,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::ExecutiveSummary,
        Page::KeyDriverAnalysis,
        Page::ModelInterpretation,
        Page::ActionableInsights,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Page::ExecutiveSummary => "executive-summary",
            Page::KeyDriverAnalysis => "key-driver-analysis",
            Page::ModelInterpretation => "model-interpretation",
            Page::ActionableInsights => "actionable-insights",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::ExecutiveSummary => "Executive Summary",
            Page::KeyDriverAnalysis => "Key Driver Analysis",
            Page::ModelInterpretation => "Model Interpretation",
            Page::ActionableInsights => "Actionable Insights",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.slug() == slug)
    }
}

const STYLE: &str = "\
body{margin:0;font-family:-apple-system,'Segoe UI',Roboto,sans-serif;color:#262730;display:flex;min-height:100vh}\
aside{width:250px;background:#f0f2f6;padding:1.5rem}\
aside a{display:block;padding:.4rem .6rem;color:#262730;text-decoration:none;border-radius:.4rem}\
aside a.active{background:#ff4b4b;color:#fff}\
main{flex:1;padding:2rem 3rem;max-width:1200px}\
.metrics{display:flex;gap:2rem}\
.metric{flex:1}.metric .label{font-size:.9rem;color:#555}.metric .value{font-size:2.2rem}\
.columns{display:flex;gap:2rem}.columns>div{flex:1}\
.note{padding:1rem;border-radius:.5rem;margin:1rem 0}\
.info{background:#e8f0fe}.success{background:#e6f4ea}.warning{background:#fef7e0}\
table{border-collapse:collapse;width:100%}th,td{padding:.4rem .8rem;border-bottom:1px solid #ddd;text-align:left}\
td.num{text-align:right}";

/// Wrap a page body in the document shell with sidebar navigation
pub fn layout(active: Page, body: &str) -> String {
    let mut nav = String::new();
    for page in Page::ALL {
        let class = if page == active { " class=\"active\"" } else { "" };
        let _ = write!(
            nav,
            "<a href=\"/?page={}\"{}>{}</a>",
            page.slug(),
            class,
            page.label()
        );
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n\
         <aside><h2>{sidebar}</h2><h3>Navigation</h3><nav>{nav}</nav></aside>\n\
         <main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape_html(APP_TITLE),
        style = STYLE,
        sidebar = escape_html(SIDEBAR_TITLE),
        nav = nav,
        body = body,
    )
}
