use crate::actions::Action;

/// Opens URLs on behalf of the plugin.
pub trait UrlOpener: Send + Sync {
    fn open_url(&self, url: &str) -> anyhow::Result<()>;
}

/// Uses the platform's default handler for the URL.
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        tracing::debug!("opening {url}");
        open::that(url).map_err(|e| e.into())
    }
}

/// Run an action returned by a plugin.
pub fn launch_action(action: &Action, opener: &dyn UrlOpener) -> anyhow::Result<()> {
    if action.action.is_empty() {
        anyhow::bail!("action '{}' has no target", action.label);
    }
    opener.open_url(&action.action)
}
