use pt_core::ports::{NavigationPort, Notice, NoticeLevel, NotificationPort};
use tracing::debug;

/// Shows notices as terminal lines and reports navigation instead of
/// performing it.
#[derive(Debug, Default)]
pub struct ConsoleUi {
    quiet: bool,
}

impl ConsoleUi {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

pub(crate) fn render_notice(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    format!("[{tag}] {}", notice.message)
}

impl NotificationPort for ConsoleUi {
    fn notify(&self, notice: Notice) {
        debug!(level = ?notice.level, message = %notice.message, "Notice");
        if self.quiet {
            return;
        }
        match notice.level {
            NoticeLevel::Success => println!("{}", render_notice(&notice)),
            NoticeLevel::Warning | NoticeLevel::Error => eprintln!("{}", render_notice(&notice)),
        }
    }
}

impl NavigationPort for ConsoleUi {
    fn navigate(&self, route: &str) {
        debug!(route, "Navigate");
        if !self.quiet {
            println!("-> {route}");
        }
    }
}
