use code_playground::{PreviewDocument, RunId, SANDBOX_POLICY};
use zoon::*;

/// Sandboxed frame running the composed document.
///
/// Built anew for every run, so an unchanged document still re-executes.
pub fn preview_frame(run_id: RunId, document: &PreviewDocument) -> impl Element {
    RawHtmlEl::new("iframe")
        .attr("title", "Output")
        .attr("sandbox", SANDBOX_POLICY)
        .attr("data-run-id", &run_id.to_string())
        .attr("srcdoc", document.as_str())
        .attr("frameborder", "0")
        .style("width", "100%")
        .style("height", "100%")
        .style("border", "none")
        .style("border-radius", "16px")
        .style("background", "white")
}
