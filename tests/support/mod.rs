#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use websearch::launcher::UrlOpener;
use websearch::recycle::RecycleBin;
use websearch::SearchEngine;

#[derive(Clone, Default)]
pub struct RecordingOpener {
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl UrlOpener for RecordingOpener {
    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingRecycleBin {
    pub recycled: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecycleBin for RecordingRecycleBin {
    fn recycle(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::remove_file(path)?;
        self.recycled.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

pub fn engine(id: &str, name: &str, trigger: &str, fallback: bool) -> SearchEngine {
    SearchEngine {
        id: id.into(),
        name: name.into(),
        url: format!("https://{}.example/search?q=%s", name.to_lowercase()),
        trigger: trigger.into(),
        icon_path: format!(":{}", name.to_lowercase()),
        fallback,
    }
}
