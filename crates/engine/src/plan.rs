//! Document plan construction from an enriched plan.

use collaborators::{ComponentInstance, DocProps, DocumentPlan, EnrichedPlan, UNRESOLVED};

use crate::SchematicRelease;

pub const TITLE_COMPONENT: &str = "DocumentTitle";
pub const TEST_BLOCK_COMPONENT: &str = "TestBlock";

const DOCUMENT_TITLE: &str = "Design Verification Test Procedure";
const TEST_BLOCK_DESCRIPTION: &str = "Validate power supply voltage requirements";

/// `{product}-DVT-Procedure-Rev-{revision}`
pub fn document_filename(release: &SchematicRelease) -> String {
    format!("{}-DVT-Procedure-Rev-{}", release.product_name, release.revision)
}

/// Names of enriched components whose voltage is still the placeholder.
pub fn unresolved_components(enriched: &EnrichedPlan) -> Vec<String> {
    enriched
        .components
        .iter()
        .filter(|c| c.voltage == UNRESOLVED)
        .map(|c| c.name.clone())
        .collect()
}

/// One title block followed by one test block per enriched component, in the
/// enriched plan's order.
pub fn build_document_plan(release: &SchematicRelease, enriched: &EnrichedPlan) -> DocumentPlan {
    let title = ComponentInstance::new(TITLE_COMPONENT)
        .prop("document_title", DOCUMENT_TITLE)
        .prop("product_name", release.product_name.as_str())
        .prop("revision", release.revision.as_str());

    let test_blocks = enriched.components.iter().map(|component| {
        ComponentInstance::new(TEST_BLOCK_COMPONENT)
            .prop("test_name", component.name.as_str())
            .prop("voltage", component.voltage.as_str())
            .prop("product_name", release.product_name.as_str())
            .prop("description", TEST_BLOCK_DESCRIPTION)
    });

    DocumentPlan {
        doc_props: Some(DocProps {
            filename: Some(document_filename(release)),
        }),
        body: std::iter::once(title).chain(test_blocks).collect(),
    }
}
