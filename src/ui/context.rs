use std::{path::PathBuf, sync::Arc};

use flume::Sender;

use crate::{
    event::events::Event,
    http::{Endpoints, MediaApi},
    playback::Player,
};

pub struct AppContext {
    pub api: Arc<dyn MediaApi>,
    pub endpoints: Endpoints,
    pub player: Player,
    pub download_dir: PathBuf,
    pub event_tx: Sender<Event>,
}
