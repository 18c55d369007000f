// ABOUTME: CLI pages command
// Walks the wizard with given checkbox states and flags and prints the pages it visits

use anyhow::{bail, Context, Result};
use serde::Serialize;

use super::{OutputFormat, PagesArgs};
use setup_wizard::config::WizardConfig;
use setup_wizard::wizard::{
    default_pages, ControlKind, FeatureFlags, FormView, NoopDispatcher, WizardController,
};

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PageEntry {
    pub id: String,
    pub visible: bool,
}

/// JSON output structure for the pages command
#[derive(Debug, Serialize)]
pub struct PagesOutput {
    /// Pages in the order Next would visit them
    pub route: Vec<String>,
    pub pages: Vec<PageEntry>,
}

/// Build the navigation plan for the given checked boxes and flags
pub fn plan(checked: &[String], flags: FeatureFlags) -> Result<PagesOutput> {
    let pages = default_pages();

    let checkbox_ids: Vec<&str> = pages
        .iter()
        .flat_map(|p| p.controls.iter())
        .filter(|c| matches!(c.kind, ControlKind::Checkbox { .. }))
        .map(|c| c.id.as_str())
        .collect();

    for id in checked {
        if !checkbox_ids.contains(&id.as_str()) {
            bail!("Unknown checkbox '{}'. Known checkboxes: {}", id, checkbox_ids.join(", "));
        }
    }

    let mut view = FormView::from_pages(&pages);
    for id in &checkbox_ids {
        view.set_checked(id, checked.iter().any(|c| c == id));
    }

    let mut controller = WizardController::new(pages, flags, view, NoopDispatcher)
        .context("Failed to build wizard")?;
    controller.init();

    let mut route = vec![controller.current_page().id.clone()];
    loop {
        let before = controller.current_index();
        if controller.next() == before {
            break;
        }
        route.push(controller.current_page().id.clone());
    }

    let pages = (0..controller.pages().len())
        .map(|idx| PageEntry {
            id: controller.pages()[idx].id.clone(),
            visible: controller.is_page_visible(idx),
        })
        .collect();

    Ok(PagesOutput { route, pages })
}

/// Execute the pages command
pub fn execute(args: PagesArgs, config: &WizardConfig, format: OutputFormat) -> Result<()> {
    let flags = args.features.apply(config.features);
    let output = plan(&args.checked, flags)?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialize page plan")?
            );
        }
        OutputFormat::Text => {
            println!("Route: {}", output.route.join(" → "));
            println!("{}", "━".repeat(44));
            for page in &output.pages {
                let marker = if page.visible { "\x1b[32m●\x1b[0m" } else { "\x1b[90m○\x1b[0m" };
                println!("{marker} {}", page.id);
            }
        }
    }

    Ok(())
}
