mod status_poller;

pub use status_poller::{LiveGame, StatusPoller, start_polling};
