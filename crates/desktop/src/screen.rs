use std::path::Path;

use iced::widget::{button, column, container, pick_list, progress_bar, row, text, Space};
use iced::{Element, Length};

use videoscribe_core::shared::model_size::ModelSize;

use crate::app::{Message, ProcessingState};
use crate::settings::Appearance;

pub fn view<'a>(
    input_path: Option<&Path>,
    output_path: Option<&Path>,
    processing: &ProcessingState,
    model_size: ModelSize,
    appearance: Appearance,
) -> Element<'a, Message> {
    if input_path.is_none() {
        return empty_state();
    }

    if let ProcessingState::Complete {
        chunks,
        total_elapsed,
    } = processing
    {
        return complete_state(output_path, *chunks, total_elapsed.as_secs());
    }

    if let ProcessingState::Error(ref e) = processing {
        return error_state(e);
    }

    workflow_view(input_path, output_path, processing, model_size, appearance)
}

fn empty_state<'a>() -> Element<'a, Message> {
    centered(
        column![
            text("Transcribe a video to text").size(20),
            Space::new().height(8),
            text("Pick a video file; the transcript is saved next to it.").size(14),
            Space::new().height(24),
            button(text("Browse Files").size(15))
                .on_press(Message::SelectInput)
                .padding([12, 24]),
            Space::new().height(12),
            text("MP4, MKV, AVI, MOV, WEBM").size(12),
        ]
        .align_x(iced::Alignment::Center)
        .into(),
    )
}

fn complete_state<'a>(
    output_path: Option<&Path>,
    chunks: usize,
    total_secs: u64,
) -> Element<'a, Message> {
    let filename = output_path
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    centered(
        column![
            text("All done!").size(20),
            Space::new().height(6),
            text(format!("Saved as {filename}")).size(14),
            text(format!(
                "{chunks} chunks in {} min {} sec",
                total_secs / 60,
                total_secs % 60
            ))
            .size(13),
            Space::new().height(24),
            button(text("Show in Folder").size(15))
                .on_press(Message::ShowInFolder)
                .padding([12, 24])
                .width(Length::Fill),
            Space::new().height(10),
            button(text("Transcribe Another Video").size(14))
                .on_press(Message::StartOver)
                .padding([12, 20])
                .width(Length::Fill)
                .style(button::secondary),
        ]
        .align_x(iced::Alignment::Center)
        .width(300)
        .into(),
    )
}

fn error_state<'a>(error: &str) -> Element<'a, Message> {
    centered(
        column![
            text("Something went wrong").size(18),
            Space::new().height(8),
            text(error.to_owned()).size(14),
            Space::new().height(20),
            button(text("Try Again").size(14))
                .on_press(Message::RunTranscribe)
                .padding([12, 24])
                .width(Length::Fill),
            Space::new().height(10),
            button(text("Start Over").size(14))
                .on_press(Message::StartOver)
                .padding([12, 20])
                .width(Length::Fill)
                .style(button::secondary),
        ]
        .align_x(iced::Alignment::Center)
        .width(320)
        .into(),
    )
}

fn workflow_view<'a>(
    input_path: Option<&Path>,
    output_path: Option<&Path>,
    processing: &ProcessingState,
    model_size: ModelSize,
    appearance: Appearance,
) -> Element<'a, Message> {
    let is_processing = !matches!(processing, ProcessingState::Idle);

    let mut col = column![].spacing(0).padding(16);

    if !is_processing {
        col = col
            .push(file_row("Input", input_path, Message::SelectInput))
            .push(Space::new().height(12))
            .push(file_row("Saves to", output_path, Message::SelectInput))
            .push(Space::new().height(16))
            .push(
                row![
                    column![
                        text("MODEL").size(11),
                        pick_list(ModelSize::ALL, Some(model_size), Message::ModelChanged),
                    ]
                    .spacing(4),
                    column![
                        text("APPEARANCE").size(11),
                        pick_list(Appearance::ALL, Some(appearance), Message::AppearanceChanged),
                    ]
                    .spacing(4),
                ]
                .spacing(16),
            )
            .push(Space::new().height(6))
            .push(text(model_size.guide()).size(12))
            .push(Space::new().height(20));
    }

    match processing {
        ProcessingState::Idle => {
            col = col.push(
                button(text("Transcribe").size(15))
                    .on_press(Message::RunTranscribe)
                    .padding([14, 24])
                    .width(Length::Fill),
            );
        }
        ProcessingState::Preparing => {
            col = col.push(progress_with_cancel("Preparing...".to_string(), None, None));
        }
        ProcessingState::Downloading(downloaded, total) => {
            let status = if *total > 0 {
                let pct = (*downloaded as f64 / *total as f64 * 100.0) as u32;
                format!("Downloading speech model - {pct}%")
            } else {
                format!("Downloading speech model... {downloaded} bytes")
            };
            col = col.push(progress_with_cancel(status, None, None));
        }
        ProcessingState::Transcribing {
            completed,
            total,
            remaining,
        } => {
            let pct = if *total > 0 {
                *completed as f32 / *total as f32 * 100.0
            } else {
                0.0
            };
            let status = format!("Transcribing chunk {completed} of {total}");
            let detail = format!("Remaining: {remaining}");
            col = col.push(progress_with_cancel(status, Some(detail), Some(pct)));
        }
        _ => {}
    }

    col.into()
}

fn progress_with_cancel<'a>(
    status: String,
    detail: Option<String>,
    progress: Option<f32>,
) -> Element<'a, Message> {
    let mut col = column![text(status).size(15)]
        .spacing(8)
        .align_x(iced::Alignment::Center)
        .width(Length::Fill);

    if let Some(pct) = progress {
        col = col.push(progress_bar(0.0..=100.0, pct));
    }
    if let Some(detail) = detail {
        col = col.push(text(detail).size(13));
    }

    col = col.push(Space::new().height(16));
    col = col.push(
        button(text("Cancel").size(13))
            .on_press(Message::CancelWork)
            .padding([8, 20])
            .style(button::secondary),
    );

    container(col)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding([48, 40])
        .into()
}

fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

fn file_row<'a>(label: &str, path: Option<&Path>, on_browse: Message) -> Element<'a, Message> {
    let display_text: Element<'a, Message> = if let Some(name) = path.and_then(|p| p.file_name()) {
        text(name.to_string_lossy().to_string()).size(15).into()
    } else {
        text("No file selected").size(15).into()
    };

    let btn = button(text("Change").size(13))
        .padding([6, 14])
        .on_press(on_browse)
        .style(button::secondary);

    let label_text = text(label.to_uppercase()).size(11);

    let content = row![column![label_text, display_text].width(Length::Fill), btn]
        .spacing(8)
        .align_y(iced::Alignment::Center);

    container(content)
        .padding([14, 16])
        .style(container::rounded_box)
        .width(Length::Fill)
        .into()
}
