//! Page bodies for the four report views

use std::fmt::Write;

use super::charts::{self, PLASMA, VIRIDIS};
use crate::config::TopNBounds;
use crate::format::{escape_html, percent, thousands};
use crate::models::{
    CategoryRate, ExplainerInfo, FeatureImpact, HighRiskCustomer, SortColumn, SortOrder,
    SummaryMetrics, TableSort,
};

pub fn executive_summary(summary: &SummaryMetrics) -> String {
    format!(
        "<h1>Executive Summary: Customer Churn Analysis</h1>\n\
         <p>An overview of customer churn across the analyzed population, based on a \
         machine learning model that scores every customer's likelihood of leaving. \
         Use it to spot key drivers and the customers most at risk.</p>\n<hr>\n\
         <h2>Overall Business Health</h2>\n\
         <div class=\"metrics\">\
         <div class=\"metric\"><div class=\"label\">Total Customers Analyzed</div><div class=\"value\">{total}</div></div>\
         <div class=\"metric\"><div class=\"label\">Actual Churn Rate</div><div class=\"value\">{rate}</div></div>\
         <div class=\"metric\"><div class=\"label\">High-Risk Customers Flagged</div><div class=\"value\">{flagged}</div></div>\
         </div>\n\
         <ul>\
         <li><strong>Actual Churn Rate:</strong> share of customers in the held-out set who actually churned.</li>\
         <li><strong>High-Risk Customers Flagged:</strong> customers the model predicts will churn, the audience for targeted intervention.</li>\
         </ul>",
        total = thousands(summary.total_customers),
        rate = percent(summary.actual_churn_rate, 1),
        flagged = thousands(summary.predicted_churn_count),
    )
}

pub fn key_driver_analysis(by_contract: &[CategoryRate], by_internet: &[CategoryRate]) -> String {
    format!(
        "<h1>Key Driver Analysis: What Factors Influence Churn?</h1>\n\
         <p>How customer attributes relate to churn.</p>\n<hr>\n\
         <div class=\"columns\">\
         <div><h3>Churn Rate by Contract Type</h3>{contract}\
         <div class=\"note info\"><strong>Insight:</strong> customers on <strong>Month-to-month</strong> \
         contracts churn far more often. Moving them to longer-term contracts is a primary retention lever.</div></div>\
         <div><h3>Churn Rate by Internet Service</h3>{internet}\
         <div class=\"note info\"><strong>Insight:</strong> <strong>Fiber optic</strong> customers churn more \
         than DSL customers, pointing at satisfaction, pricing or competitor pressure on the premium service.</div></div>\
         </div>",
        contract = charts::rate_bars(by_contract, "Contract Type", "Average Churn Rate", &VIRIDIS),
        internet = charts::rate_bars(by_internet, "Internet Service", "Average Churn Rate", &PLASMA),
    )
}

pub fn model_interpretation(explainer: &ExplainerInfo, impacts: &[FeatureImpact]) -> String {
    let baseline = explainer
        .expected_value
        .map(|v| format!(" (base value {:.3})", v))
        .unwrap_or_default();

    format!(
        "<h1>Model Interpretation: Inside the Black Box</h1>\n\
         <p>Attribution values from the {kind} explainer{baseline} show how each feature moves a \
         prediction. Bar length is the average magnitude of a feature's contribution.</p>\
         <ul><li><strong>Red bars:</strong> higher feature values push predictions towards <strong>churn</strong>.</li>\
         <li><strong>Blue bars:</strong> higher feature values push predictions away from churn.</li>\
         <li><strong>Grey bars:</strong> no consistent direction.</li></ul>\n<hr>\n\
         <h3>Impact of Top Features on Churn Prediction</h3>{chart}\
         <div class=\"note success\"><strong>Key takeaways:</strong><ol>\
         <li><strong>Contract is king:</strong> one and two year contracts strongly reduce churn risk.</li>\
         <li><strong>Loyalty pays:</strong> low <code>tenure</code> (new customers) is a major risk factor.</li>\
         <li><strong>Price matters:</strong> high <code>MonthlyCharges</code> consistently push towards churn.</li>\
         </ol></div>",
        kind = escape_html(&explainer.kind),
        baseline = baseline,
        chart = charts::impact_bars(impacts),
    )
}

/// Column headers that link to the same view sorted by that column.
/// Clicking the active column flips its order.
fn sort_headers(top_n: i64, sort: TableSort) -> String {
    let mut head = String::new();
    for column in SortColumn::ALL {
        let (order, marker) = if column == sort.column {
            let marker = match sort.order {
                SortOrder::Asc => " &#9650;",
                SortOrder::Desc => " &#9660;",
            };
            (sort.order.reversed(), marker)
        } else {
            (column.first_order(), "")
        };
        let _ = write!(
            head,
            "<th><a href=\"/?page=actionable-insights&amp;top_n={n}&amp;sort={col}&amp;order={order}\">{col}</a>{marker}</th>",
            n = top_n,
            col = column,
            order = order,
            marker = marker,
        );
    }
    head
}

pub fn actionable_insights(
    customers: &[HighRiskCustomer],
    top_n: i64,
    bounds: &TopNBounds,
    sort: TableSort,
) -> String {
    let mut rows = String::new();
    for c in customers {
        let _ = write!(
            rows,
            "<tr><td>{id}</td><td class=\"num\">{prob}</td><td class=\"num\">{tenure}</td>\
             <td>{contract}</td><td>{internet}</td><td class=\"num\">{charges:.2}</td></tr>",
            id = escape_html(&c.customer_id),
            prob = c.churn_probability,
            tenure = c.tenure,
            contract = c.contract,
            internet = c.internet_service,
            charges = c.monthly_charges,
        );
    }

    format!(
        "<h1>Actionable Insights: High-Priority Customer List</h1>\n\
         <p>Customers the model rates most likely to churn, highest probability first. \
         Click a column header to sort the list. Start a targeted retention campaign here.</p>\n<hr>\n\
         <h3>Top Customers to Contact</h3>\n\
         <form method=\"get\" action=\"/\">\
         <input type=\"hidden\" name=\"page\" value=\"actionable-insights\">\
         <input type=\"hidden\" name=\"sort\" value=\"{sort_column}\">\
         <input type=\"hidden\" name=\"order\" value=\"{sort_order}\">\
         <label for=\"top_n\">Select number of top customers to display: <output id=\"top_n_value\">{n}</output></label><br>\
         <input type=\"range\" id=\"top_n\" name=\"top_n\" min=\"{min}\" max=\"{max}\" value=\"{n}\" \
         oninput=\"top_n_value.value=this.value\" onchange=\"this.form.submit()\">\
         <noscript><button type=\"submit\">Apply</button></noscript>\
         </form>\n\
         <table><thead><tr>{head}</tr></thead>\
         <tbody>{rows}</tbody></table>\n\
         <div class=\"note warning\">Recommendation: the retention team should contact these customers first, \
         with incentives tailored to their profile (for example a discount for high <code>MonthlyCharges</code>).</div>",
        n = top_n,
        min = bounds.min,
        max = bounds.max,
        sort_column = sort.column,
        sort_order = sort.order,
        head = sort_headers(top_n, sort),
        rows = rows,
    )
}
