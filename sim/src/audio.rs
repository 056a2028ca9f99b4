use trellis_memory_core::{AudioPlayer, GameState, Track, Voice};

/// Audio backend without an output device, every request ends up in the log.
#[derive(Clone, Debug)]
pub struct LoggingAudio {
    current: Option<Track>,
    levels: [f32; 2],
}

impl LoggingAudio {
    pub fn new() -> Self {
        Self {
            current: None,
            levels: [1.0; 2],
        }
    }

    pub fn current(&self) -> Option<Track> {
        self.current
    }

    pub fn level(&self, voice: Voice) -> f32 {
        self.levels[voice.index()]
    }
}

impl AudioPlayer for LoggingAudio {
    fn handle_audio_for_state(&mut self, state: GameState) {
        let track = Track::for_state(state);
        if self.current == Some(track) {
            return;
        }
        log::info!(
            "Music: {} (loop: {}, level {:.2})",
            track.file_name(),
            track.loops(),
            self.level(Voice::Music)
        );
        self.current = Some(track);
    }

    fn play_correct_sound(&mut self) {
        log::info!(
            "Effect: {} (level {:.2})",
            Track::Correct.file_name(),
            self.level(Voice::Effects)
        );
    }

    fn set_level(&mut self, voice: Voice, level: f32) {
        log::debug!("{:?} level set to {:.2}", voice, level);
        self.levels[voice.index()] = level;
    }
}

#[cfg(feature = "rodio")]
pub use self::device::RodioAudio;

#[cfg(feature = "rodio")]
mod device {
    use std::collections::HashMap;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;

    use anyhow::Context;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
    use trellis_memory_core::{AudioPlayer, GameState, Track, Voice};

    type Asset = Cursor<Arc<[u8]>>;

    /// Plays the wave assets on the default output device.
    pub struct RodioAudio {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        music: Sink,
        assets: HashMap<Track, Arc<[u8]>>,
        current: Option<Track>,
        levels: [f32; 2],
    }

    impl RodioAudio {
        /// Loads and checks every track under `dir` before opening the device.
        pub fn new(dir: &Path) -> anyhow::Result<Self> {
            let mut assets = HashMap::new();
            for track in Track::ALL {
                let path = dir.join(track.file_name());
                let bytes: Arc<[u8]> = fs::read(&path)
                    .with_context(|| format!("Could not read audio asset {}", path.display()))?
                    .into();
                Decoder::new(Cursor::new(bytes.clone()))
                    .with_context(|| format!("Could not decode audio asset {}", path.display()))?;
                assets.insert(track, bytes);
            }

            let (stream, handle) =
                OutputStream::try_default().context("Could not open audio output")?;
            let music = Sink::try_new(&handle).context("Could not create music sink")?;
            Ok(Self {
                _stream: stream,
                handle,
                music,
                assets,
                current: None,
                levels: [1.0; 2],
            })
        }

        fn decoder(&self, track: Track) -> anyhow::Result<Decoder<Asset>> {
            let bytes = self
                .assets
                .get(&track)
                .with_context(|| format!("{} was not loaded", track.file_name()))?;
            Decoder::new(Cursor::new(bytes.clone()))
                .with_context(|| format!("Could not decode {}", track.file_name()))
        }

        fn play_music(&mut self, track: Track) -> anyhow::Result<()> {
            let source = self.decoder(track)?;
            let sink = Sink::try_new(&self.handle).context("Could not create music sink")?;
            sink.set_volume(self.levels[Voice::Music.index()]);
            if track.loops() {
                sink.append(source.repeat_infinite());
            } else {
                sink.append(source);
            }
            self.music = sink;
            Ok(())
        }

        fn play_effect(&self, track: Track) -> anyhow::Result<()> {
            let source = self.decoder(track)?;
            let sink = Sink::try_new(&self.handle).context("Could not create effects sink")?;
            sink.set_volume(self.levels[Voice::Effects.index()]);
            sink.append(source);
            sink.detach();
            Ok(())
        }
    }

    impl AudioPlayer for RodioAudio {
        fn handle_audio_for_state(&mut self, state: GameState) {
            let track = Track::for_state(state);
            if self.current == Some(track) {
                return;
            }
            match self.play_music(track) {
                Ok(()) => self.current = Some(track),
                Err(err) => log::error!("Could not switch music: {:#}", err),
            }
        }

        fn play_correct_sound(&mut self) {
            if let Err(err) = self.play_effect(Track::Correct) {
                log::error!("Could not play effect: {:#}", err);
            }
        }

        fn set_level(&mut self, voice: Voice, level: f32) {
            self.levels[voice.index()] = level;
            if voice == Voice::Music {
                self.music.set_volume(level);
            }
        }
    }
}
