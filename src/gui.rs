// Window front-end: folder/percent form, progress bar and log pane
use batch_image_resizer::batch::{self, output_dir_for};
use batch_image_resizer::BatchReporter;
use iced::font::{Family, Weight};
use iced::widget::{button, column, container, progress_bar, row, scrollable, text, text_input, Space};
use iced::{executor, subscription, Application, Command, Element, Font, Length, Settings, Subscription, Theme};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{info, warn};

const HEADING_FONT: Font = Font {
    family: Family::SansSerif,
    weight: Weight::Bold,
    stretch: iced::font::Stretch::Normal,
    monospaced: false,
};

const BODY_FONT: Font = Font {
    family: Family::SansSerif,
    weight: Weight::Normal,
    stretch: iced::font::Stretch::Normal,
    monospaced: false,
};

const LOG_FONT: Font = Font {
    family: Family::Monospace,
    weight: Weight::Normal,
    stretch: iced::font::Stretch::Normal,
    monospaced: true,
};

const LOG_SCROLL_ID: &str = "log";

/// Initial form values, taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub folder: Option<String>,
    pub percent: String,
}

pub fn run(options: LaunchOptions) -> iced::Result {
    let mut settings = Settings::with_flags(options);
    settings.window = iced::window::Settings {
        size: (685, 500),
        min_size: Some((480, 360)),
        resizable: true,
        decorations: true,
        ..Default::default()
    };
    settings.default_font = BODY_FONT;
    settings.default_text_size = 14.0;

    ImageResizer::run(settings)
}

#[derive(Default)]
struct ImageResizer {
    folder: String,
    percent: String,
    running: Option<ActiveRun>,
    next_run_id: u64,
    progress: f32,
    log: Vec<String>,
}

/// Inputs of the batch currently executing; keeps its subscription alive.
#[derive(Debug, Clone)]
struct ActiveRun {
    id: u64,
    folder: String,
    percent: String,
}

#[derive(Debug, Clone)]
enum Message {
    SelectFolder,
    FolderSelected(Option<PathBuf>),
    FolderChanged(String),
    PercentChanged(String),
    Process,
    Batch(BatchEvent),
    OpenOutputFolder,
    ClearLog,
}

/// Reporter callbacks, forwarded from the worker thread to the window.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchEvent {
    Started(usize),
    Log(String),
    Progress(f32),
    Finished,
}

impl Application for ImageResizer {
    type Message = Message;
    type Theme = Theme;
    type Executor = executor::Default;
    type Flags = LaunchOptions;

    fn new(flags: LaunchOptions) -> (Self, Command<Message>) {
        let app = Self {
            folder: flags.folder.unwrap_or_default(),
            percent: flags.percent,
            ..Self::default()
        };
        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Image Resizer")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::SelectFolder => {
                return Command::perform(select_folder(), Message::FolderSelected);
            }
            Message::FolderSelected(path) => {
                if let Some(path) = path {
                    self.folder = path.display().to_string();
                }
            }
            Message::FolderChanged(value) => {
                self.folder = value;
            }
            Message::PercentChanged(value) => {
                self.percent = value;
            }
            Message::Process => {
                if self.running.is_none() {
                    self.next_run_id += 1;
                    self.progress = 0.0;
                    self.running = Some(ActiveRun {
                        id: self.next_run_id,
                        folder: self.folder.clone(),
                        percent: self.percent.clone(),
                    });
                }
            }
            Message::Batch(event) => match event {
                BatchEvent::Started(total) => {
                    info!("batch started with {} images", total);
                    self.log.clear();
                }
                BatchEvent::Log(line) => {
                    self.log.push(line);
                    return scrollable::snap_to(
                        scrollable::Id::new(LOG_SCROLL_ID),
                        scrollable::RelativeOffset::END,
                    );
                }
                BatchEvent::Progress(percent) => {
                    self.progress = percent;
                }
                BatchEvent::Finished => {
                    self.running = None;
                }
            },
            Message::OpenOutputFolder => {
                let output_dir = output_dir_for(Path::new(self.folder.trim()));
                if output_dir.is_dir() {
                    if let Err(e) = open::that(&output_dir) {
                        warn!("could not open {}: {}", output_dir.display(), e);
                        self.log.push(format!(
                            "Error: could not open {}: {}",
                            output_dir.display(),
                            e
                        ));
                    }
                } else {
                    self.log.push(format!("Nothing to open yet: {}", output_dir.display()));
                }
            }
            Message::ClearLog => {
                self.log.clear();
                self.progress = 0.0;
            }
        }
        Command::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        match &self.running {
            Some(run) => batch_events(run.clone()).map(Message::Batch),
            None => Subscription::none(),
        }
    }

    fn view(&self) -> Element<Message> {
        let title = text("Image Resizer").size(22).font(HEADING_FONT);

        let folder_row = row![
            text("Select Folder:").size(13).width(130),
            text_input("Folder with PNG or JPEG images", &self.folder)
                .on_input(Message::FolderChanged)
                .width(Length::Fill)
                .padding(4)
                .size(13),
            button("Browse")
                .on_press(Message::SelectFolder)
                .padding([6, 12]),
        ]
        .spacing(8);

        let percent_row = row![
            text("Resize Percentage (1-100):").size(13).width(200),
            text_input("50", &self.percent)
                .on_input(Message::PercentChanged)
                .width(Length::Fixed(70.0))
                .padding(4)
                .size(13),
        ]
        .spacing(8);

        let process_button = if self.running.is_some() {
            button("Processing...").padding([8, 16])
        } else {
            button("Process Images")
                .on_press(Message::Process)
                .padding([8, 16])
        };

        let log_lines: Vec<Element<Message>> = self
            .log
            .iter()
            .map(|line| text(line).size(12).font(LOG_FONT).into())
            .collect();

        let log_pane = container(
            scrollable(column(log_lines).spacing(2).width(Length::Fill))
                .id(scrollable::Id::new(LOG_SCROLL_ID))
                .height(Length::Fill),
        )
        .style(iced::theme::Container::Box)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(8);

        let footer = row![
            button("Open Output")
                .on_press(Message::OpenOutputFolder)
                .padding([6, 12]),
            button("Clear").on_press(Message::ClearLog).padding([6, 12]),
        ]
        .spacing(8);

        let content = column![
            title,
            Space::with_height(12),
            folder_row,
            percent_row,
            Space::with_height(8),
            process_button,
            Space::with_height(8),
            progress_bar(0.0..=100.0, self.progress).height(Length::Fixed(8.0)),
            Space::with_height(8),
            log_pane,
            Space::with_height(8),
            footer,
        ]
        .spacing(6)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

async fn select_folder() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .pick_folder()
        .await
        .map(|handle| handle.path().to_path_buf())
}

/// Sends every reporter callback over a channel.
struct ChannelReporter {
    sender: mpsc::UnboundedSender<BatchEvent>,
}

impl BatchReporter for ChannelReporter {
    fn on_start(&mut self, total: usize) {
        let _ = self.sender.send(BatchEvent::Started(total));
    }

    fn on_log(&mut self, line: &str) {
        let _ = self.sender.send(BatchEvent::Log(line.to_string()));
    }

    fn on_progress(&mut self, percent: f32) {
        let _ = self.sender.send(BatchEvent::Progress(percent));
    }
}

enum WorkerState {
    Ready(ActiveRun),
    Running(mpsc::UnboundedReceiver<BatchEvent>),
    Finished,
}

fn batch_events(run: ActiveRun) -> Subscription<BatchEvent> {
    subscription::unfold(run.id, WorkerState::Ready(run), next_event)
}

async fn next_event(state: WorkerState) -> (BatchEvent, WorkerState) {
    match state {
        WorkerState::Ready(run) => {
            let (sender, receiver) = mpsc::unbounded_channel();
            tokio::task::spawn_blocking(move || {
                let mut reporter = ChannelReporter { sender };
                batch::run(&run.folder, &run.percent, &mut reporter);
            });
            receive(receiver).await
        }
        WorkerState::Running(receiver) => receive(receiver).await,
        // Stay idle until the window drops this subscription
        WorkerState::Finished => iced::futures::future::pending().await,
    }
}

async fn receive(mut receiver: mpsc::UnboundedReceiver<BatchEvent>) -> (BatchEvent, WorkerState) {
    match receiver.recv().await {
        Some(event) => (event, WorkerState::Running(receiver)),
        None => (BatchEvent::Finished, WorkerState::Finished),
    }
}
