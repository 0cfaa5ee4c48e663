//! Spoken instruction and feedback clips.
//!
//! The phrases are fixed; the audio comes from an external text-to-speech
//! tool. This module only decides what to say and where to put it.

use crate::{AssetStatus, BatchSummary, Capability, Error, Result, pipeline::ensure_output_dir};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Which group of clips a phrase belongs to; also the output subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipCategory {
    Instructions,
    Feedback,
}

impl ClipCategory {
    pub const ALL: [ClipCategory; 2] = [ClipCategory::Instructions, ClipCategory::Feedback];

    pub fn dir_name(self) -> &'static str {
        match self {
            ClipCategory::Instructions => "instructions",
            ClipCategory::Feedback => "feedback",
        }
    }

    pub fn clips(self) -> &'static [SpeechClip] {
        match self {
            ClipCategory::Instructions => INSTRUCTIONS,
            ClipCategory::Feedback => FEEDBACK,
        }
    }

    /// `<assets_root>/audio/<category>/`
    pub fn output_dir(self, assets_root: &Path) -> PathBuf {
        assets_root.join("audio").join(self.dir_name())
    }
}

/// A phrase and the file it is rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechClip {
    pub file_name: &'static str,
    pub text: &'static str,
}

const fn clip(file_name: &'static str, text: &'static str) -> SpeechClip {
    SpeechClip { file_name, text }
}

/// Task instructions, one per activity.
pub const INSTRUCTIONS: &[SpeechClip] = &[
    clip("same_sound.mp3", "같은 소리를 찾아보세요"),
    clip("different_sound.mp3", "다른 소리를 찾아보세요"),
    clip("syllable_clap.mp3", "박수로 음절을 쪼개보세요"),
    clip("rhyme.mp3", "같은 소리로 끝나는 것을 찾아보세요"),
    clip("syllable_merge.mp3", "음절을 합쳐서 단어를 만드세요"),
    clip("syllable_split.mp3", "단어를 음절로 나눠보세요"),
    clip("rhythm_follow.mp3", "리듬을 따라 박수를 쳐보세요"),
    clip("onset_separation.mp3", "첫 소리를 분리해보세요"),
    clip("phoneme_synthesis.mp3", "소리를 합쳐서 단어를 만드세요"),
    clip(
        "phoneme_substitution.mp3",
        "소리를 바꿔서 새로운 단어를 만드세요",
    ),
    clip("animal_sound_story.mp3", "동물 소리 이야기를 들어보세요"),
    clip("environmental_sound.mp3", "주변 소리를 구별해보세요"),
    clip("volume_comparison.mp3", "더 큰 소리를 찾아보세요"),
    clip("pitch_discrimination.mp3", "더 높은 소리를 찾아보세요"),
    clip("hidden_letter.mp3", "숨어있는 글자를 찾아보세요"),
    clip("letter_direction.mp3", "방향이 다른 글자를 찾아보세요"),
    clip("mirror_symmetry.mp3", "대칭인 글자를 찾아보세요"),
    clip("card_match.mp3", "같은 카드를 찾아보세요"),
    clip("digit_span.mp3", "숫자를 순서대로 기억하세요"),
    clip("reverse_speak.mp3", "거꾸로 말해보세요"),
    clip("go_no_go_basic.mp3", "지시한 것만 터치하세요"),
    clip("stroop.mp3", "색깔 이름을 말해보세요"),
    clip("target_hunt.mp3", "목표를 빠르게 찾아보세요"),
];

/// Praise, retry and encouragement lines.
pub const FEEDBACK: &[SpeechClip] = &[
    clip("correct1.mp3", "잘했어요!"),
    clip("correct2.mp3", "훌륭해요!"),
    clip("correct3.mp3", "멋져요!"),
    clip("correct4.mp3", "완벽해요!"),
    clip("incorrect1.mp3", "다시 한번 해볼까요?"),
    clip("incorrect2.mp3", "괜찮아요!"),
    clip("encouragement1.mp3", "조금만 더!"),
    clip("encouragement2.mp3", "거의 다 왔어요!"),
];

/// A text-to-speech backend that writes MP3 files.
pub trait SpeechSynthesizer {
    fn name(&self) -> &str;

    fn probe(&self) -> Capability;

    /// Renders `text` into `output`. Failures should be [`Error::Speech`].
    fn synthesize(&self, text: &str, output: &Path) -> Result<()>;
}

/// Drives the `gtts-cli` command from the gTTS package (Korean, slow speech).
#[derive(Debug, Clone)]
pub struct GttsCli {
    binary: Option<PathBuf>,
}

impl GttsCli {
    pub const PROGRAM: &'static str = "gtts-cli";

    /// Locates `gtts-cli` on `PATH`.
    pub fn detect() -> Self {
        Self {
            binary: which::which(Self::PROGRAM).ok(),
        }
    }
}

impl SpeechSynthesizer for GttsCli {
    fn name(&self) -> &str {
        Self::PROGRAM
    }

    fn probe(&self) -> Capability {
        if self.binary.is_some() {
            Capability::Available
        } else {
            Capability::Unavailable
        }
    }

    fn synthesize(&self, text: &str, output: &Path) -> Result<()> {
        let binary = self.binary.as_ref().ok_or(Error::SpeechUnavailable)?;
        let result = Command::new(binary)
            .args(["--lang", "ko", "--slow", "--output"])
            .arg(output)
            .arg(text)
            .output()
            .map_err(|e| Error::Speech(format!("failed to run {}: {e}", binary.display())))?;

        if !result.status.success() {
            return Err(Error::Speech(format!(
                "{} exited with {}: {}",
                Self::PROGRAM,
                result.status,
                crate::transcode::stderr_tail(&result.stderr)
            )));
        }
        Ok(())
    }
}

/// Renders every clip of the given categories under `assets_root`.
///
/// # Errors
///
/// `SpeechUnavailable` if the backend cannot run, checked before any
/// directory is created. A category whose directory cannot be created is
/// recorded as one failed entry and the remaining categories still run.
/// Individual clip failures are recorded in the summary as well.
pub fn generate_speech_clips(
    assets_root: &Path,
    categories: &[ClipCategory],
    backend: &dyn SpeechSynthesizer,
) -> Result<BatchSummary> {
    if backend.probe() == Capability::Unavailable {
        return Err(Error::SpeechUnavailable);
    }

    let mut summary = BatchSummary::new();
    for &category in categories {
        let dir = category.output_dir(assets_root);
        if let Err(err) = ensure_output_dir(&dir) {
            tracing::warn!(category = category.dir_name(), "skipping category: {err}");
            summary.record(category.dir_name(), AssetStatus::Failed(err));
            continue;
        }
        tracing::info!(
            category = category.dir_name(),
            count = category.clips().len(),
            "rendering speech clips"
        );

        for clip in category.clips() {
            let path = dir.join(clip.file_name);
            let status = match backend.synthesize(clip.text, &path) {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "rendered");
                    AssetStatus::Complete(path)
                }
                Err(err) => {
                    tracing::warn!(
                        clip = clip.file_name,
                        backend = backend.name(),
                        "speech failed: {err}"
                    );
                    AssetStatus::Failed(err)
                }
            };
            let name = format!("{}/{}", category.dir_name(), clip.file_name);
            summary.record(name, status);
        }
    }
    Ok(summary)
}
