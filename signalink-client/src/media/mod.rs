use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::media::Sample;
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

use crate::error::NegotiationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Audio,
    Video,
}

/// One locally captured track.
///
/// Capture pipelines feed encoded media through [`LocalTrack::write_sample`],
/// which drops samples while the track is disabled or stopped.
pub struct LocalTrack {
    kind: TrackKind,
    rtp: Arc<TrackLocalStaticSample>,
    enabled: AtomicBool,
    stopped: AtomicBool,
}

impl std::fmt::Debug for LocalTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalTrack")
            .field("id", &self.id())
            .field("kind", &self.kind)
            .field("enabled", &self.is_enabled())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

impl LocalTrack {
    pub fn new(kind: TrackKind, rtp: Arc<TrackLocalStaticSample>) -> Self {
        Self {
            kind,
            rtp,
            enabled: AtomicBool::new(true),
            stopped: AtomicBool::new(false),
        }
    }

    pub fn audio(id: &str, stream_id: &str) -> Self {
        Self::with_codec(TrackKind::Audio, MIME_TYPE_OPUS, id, stream_id)
    }

    pub fn video(id: &str, stream_id: &str) -> Self {
        Self::with_codec(TrackKind::Video, MIME_TYPE_VP8, id, stream_id)
    }

    fn with_codec(kind: TrackKind, mime_type: &str, id: &str, stream_id: &str) -> Self {
        let rtp = TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: mime_type.to_owned(),
                ..Default::default()
            },
            id.to_owned(),
            stream_id.to_owned(),
        );
        Self::new(kind, Arc::new(rtp))
    }

    pub fn id(&self) -> &str {
        self.rtp.id()
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn rtp(&self) -> Arc<TrackLocalStaticSample> {
        self.rtp.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Returns whether the sample was sent on.
    pub async fn write_sample(&self, sample: &Sample) -> anyhow::Result<bool> {
        if self.is_stopped() || !self.is_enabled() {
            return Ok(false);
        }

        self.rtp
            .write_sample(sample)
            .await
            .with_context(|| format!("Failed to write sample to track '{}'", self.id()))?;
        Ok(true)
    }

    /// Permanently ends the track. Stopped tracks are never attached again.
    pub fn stop(&self) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            debug!("Stopped local {:?} track '{}'", self.kind, self.id());
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// The set of tracks captured for one call.
#[derive(Debug, Default, Clone)]
pub struct LocalStream {
    tracks: Vec<Arc<LocalTrack>>,
}

impl LocalStream {
    pub fn new(tracks: Vec<Arc<LocalTrack>>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[Arc<LocalTrack>] {
        &self.tracks
    }

    pub fn live_tracks(&self) -> impl Iterator<Item = &Arc<LocalTrack>> {
        self.tracks.iter().filter(|t| !t.is_stopped())
    }

    pub fn set_enabled(&self, kind: TrackKind, enabled: bool) {
        for track in self.tracks.iter().filter(|t| t.kind() == kind) {
            track.set_enabled(enabled);
        }
    }

    pub fn stop_all(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }
}

/// Supplier of local media. Acquisition may fail when device access is denied.
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn acquire(&self) -> Result<LocalStream, NegotiationError>;
}

const OPUS_SILENCE: [u8; 3] = [0xf8, 0xff, 0xfe];
const AUDIO_FRAME: Duration = Duration::from_millis(20);

/// Feeds Opus silence frames into `track` until it is stopped.
fn pump_silence(track: Arc<LocalTrack>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(AUDIO_FRAME);
        while !track.is_stopped() {
            ticker.tick().await;
            let sample = Sample {
                data: OPUS_SILENCE.to_vec().into(),
                duration: AUDIO_FRAME,
                ..Default::default()
            };
            if let Err(e) = track.write_sample(&sample).await {
                debug!("{:#}", e);
            }
        }
        debug!("Silence pump for '{}' finished", track.id());
    });
}

/// Opus + VP8 tracks with no device behind them; for headless participants.
///
/// The audio track carries Opus silence; the video track stays empty.
#[derive(Debug, Clone)]
pub struct SyntheticMediaSource {
    stream_id: String,
}

impl SyntheticMediaSource {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
        }
    }
}

impl Default for SyntheticMediaSource {
    fn default() -> Self {
        Self::new("signalink")
    }
}

#[async_trait]
impl MediaSource for SyntheticMediaSource {
    async fn acquire(&self) -> Result<LocalStream, NegotiationError> {
        let audio = Arc::new(LocalTrack::audio("audio", &self.stream_id));
        pump_silence(audio.clone());

        Ok(LocalStream::new(vec![
            audio,
            Arc::new(LocalTrack::video("video", &self.stream_id)),
        ]))
    }
}
