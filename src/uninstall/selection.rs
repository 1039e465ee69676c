//! Component presence detection and operator selection.

use crate::core::context::Context;
use crate::core::error::UninstallError;
use crate::core::output;
use crate::core::prompt::Prompt;
use crate::host::HostEnvironment;

use super::layout::{Layout, PANEL_DIR, WINGS_CONFIG_DIR, WINGS_DATA_DIR};

/// Which components the operator chose to remove.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentSelection {
    pub remove_panel: bool,
    pub remove_wings: bool,
}

impl ComponentSelection {
    pub fn is_empty(&self) -> bool {
        !self.remove_panel && !self.remove_wings
    }
}

/// Ask about each installed component.
///
/// A component that is not on disk is never offered. Fails with
/// [`UninstallError::NothingSelected`] if nothing ends up selected.
pub fn select(ctx: &Context, prompt: &mut dyn Prompt) -> Result<ComponentSelection, UninstallError> {
    let layout = Layout::of(ctx);
    let mut selection = ComponentSelection::default();

    if layout.panel_dir().exists() {
        output::info(&format!("Panel installation detected in {}", PANEL_DIR));
        selection.remove_panel = prompt.confirm("Do you want to remove the panel?")?;
    } else {
        tracing::debug!(path = PANEL_DIR, "panel not installed");
    }

    if layout.wings_config_dir().exists() {
        output::info(&format!("Wings installation detected in {}", WINGS_CONFIG_DIR));
        output::warning(&format!(
            "Removing Wings also deletes all server data in {}",
            WINGS_DATA_DIR
        ));
        selection.remove_wings = prompt.confirm("Do you want to remove Wings (daemon)?")?;
    } else {
        tracing::debug!(path = WINGS_CONFIG_DIR, "wings not installed");
    }

    if selection.is_empty() {
        return Err(UninstallError::NothingSelected);
    }

    Ok(selection)
}

/// Print what is about to happen.
pub fn summarize(host: &HostEnvironment, selection: &ComponentSelection) {
    output::rule();
    output::action("Uninstallation summary");
    output::detail(&format!("Host: {}", host));
    output::summary_flag("Remove panel?", selection.remove_panel);
    output::summary_flag("Remove wings?", selection.remove_wings);
    output::rule();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedPrompt;
    use tempfile::TempDir;

    fn staged(panel: bool, wings: bool) -> (TempDir, Context) {
        let dir = TempDir::new().unwrap();
        let ctx = Context::with_root(dir.path());
        if panel {
            std::fs::create_dir_all(Layout::of(&ctx).panel_dir()).unwrap();
        }
        if wings {
            std::fs::create_dir_all(Layout::of(&ctx).wings_config_dir()).unwrap();
        }
        (dir, ctx)
    }

    #[test]
    fn test_absent_panel_is_never_offered() {
        let (_dir, ctx) = staged(false, true);
        let mut prompt = ScriptedPrompt::new(["y"]);

        let selection = select(&ctx, &mut prompt).unwrap();
        assert!(!selection.remove_panel);
        assert!(selection.remove_wings);
        assert_eq!(prompt.questions().len(), 1);
        assert!(prompt.questions()[0].contains("Wings"));
    }

    #[test]
    fn test_both_present_both_selected() {
        let (_dir, ctx) = staged(true, true);
        let mut prompt = ScriptedPrompt::new(["Y", "yes"]);
        let selection = select(&ctx, &mut prompt).unwrap();
        assert_eq!(
            selection,
            ComponentSelection {
                remove_panel: true,
                remove_wings: true
            }
        );
    }

    #[test]
    fn test_empty_answer_means_no() {
        let (_dir, ctx) = staged(true, true);
        let mut prompt = ScriptedPrompt::new(["", "y"]);
        let selection = select(&ctx, &mut prompt).unwrap();
        assert!(!selection.remove_panel);
        assert!(selection.remove_wings);
    }

    #[test]
    fn test_nothing_installed() {
        let (_dir, ctx) = staged(false, false);
        let mut prompt = ScriptedPrompt::new(Vec::<String>::new());
        assert!(matches!(
            select(&ctx, &mut prompt),
            Err(UninstallError::NothingSelected)
        ));
        assert!(prompt.questions().is_empty());
    }

    #[test]
    fn test_declined_everything() {
        let (_dir, ctx) = staged(true, true);
        let mut prompt = ScriptedPrompt::new(["n", "no"]);
        assert!(matches!(
            select(&ctx, &mut prompt),
            Err(UninstallError::NothingSelected)
        ));
    }
}
