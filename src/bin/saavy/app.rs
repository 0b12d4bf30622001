//! Rhythm - live audio wiring and the console loop

use std::{
    fs,
    io::{self, BufRead, Write},
    sync::{Arc, Mutex, PoisonError, RwLock},
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info, warn};

use super::console::{Command, HELP};

use saavy_rhythm::{
    engine::{FrameClock, PatternPlayer, PollingDriver, SharedPlayback, Tempo},
    graph::{
        queue::{self, QueuedGraph},
        GraphRenderer,
    },
    sequencing::{Pattern, PatternBank, STEPS},
    voices::{SharedVoiceParams, VoiceParams},
    EngineConfig, Instrument, MAX_BLOCK_SIZE,
};

/// Main application builder
pub struct Rhythm {
    config: EngineConfig,
    bank: PatternBank,
    params: VoiceParams,
}

impl Rhythm {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            bank: PatternBank::new(),
            params: VoiceParams::new(),
        }
    }

    /// Start from a loaded pattern bank
    pub fn bank(mut self, bank: PatternBank) -> Self {
        self.bank = bank;
        self
    }

    /// Run the application (takes over stdin, plays audio)
    pub fn run(self) -> EyreResult<()> {
        // Set up audio
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let stream_config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = stream_config.sample_rate().0 as f32;
        let channels = stream_config.channels() as usize;

        let config = EngineConfig {
            sample_rate,
            ..self.config
        };
        config.validate()?;

        println!("=== Saavy Rhythm ===");
        println!("Sample rate: {} Hz", sample_rate);
        println!("Channels: {}", channels);
        println!("Look-ahead: {:.0} ms", config.lookahead * 1000.0);
        println!();

        // Control side stages graph commands, the audio callback applies them
        let (graph, mut feed) = queue::channel(config.queue_capacity, sample_rate);
        let mut renderer = GraphRenderer::with_capacity(sample_rate, config.max_nodes)
            .with_master_gain(config.master_gain);
        let clock = FrameClock::new(renderer.frame_counter(), sample_rate);

        let bank = Arc::new(RwLock::new(self.bank));
        let params = SharedVoiceParams::new(self.params);
        let player = PatternPlayer::new(graph, Arc::clone(&bank), params.clone());
        let playback = player.playback();

        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| {
                feed.drain_into(&mut renderer);

                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    renderer.render(block);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| error!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;

        let mut machine = Machine {
            driver: PollingDriver::new(Arc::new(clock), config.lookahead, config.poll_interval),
            player: Arc::new(Mutex::new(player)),
            playback,
            bank,
            params,
        };

        println!("{HELP}");
        println!();
        machine.show();
        machine.console()
    }
}

/// Everything the console touches once audio is running.
struct Machine {
    driver: PollingDriver,
    player: Arc<Mutex<PatternPlayer<QueuedGraph>>>,
    playback: SharedPlayback,
    bank: Arc<RwLock<PatternBank>>,
    params: SharedVoiceParams,
}

impl Machine {
    fn console(&mut self) -> EyreResult<()> {
        let stdin = io::stdin();
        prompt()?;

        for line in stdin.lock().lines() {
            let line = line.wrap_err("failed to read stdin")?;
            if line.trim().is_empty() {
                prompt()?;
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    if let Err(err) = self.apply(command) {
                        println!("error: {err}");
                    }
                }
                Err(err) => println!("{err}"),
            }
            prompt()?;
        }

        self.stop();
        Ok(())
    }

    fn apply(&mut self, command: Command) -> EyreResult<()> {
        match command {
            Command::Play => self.play()?,
            Command::Stop => self.stop(),
            Command::Slot(slot) => {
                self.write_bank().select(slot);
                self.retempo()?;
                self.show();
            }
            Command::Step(instrument, step) => {
                self.write_bank().current_mut().toggle_step(instrument, step)?;
                self.show();
            }
            Command::Accent(step) => {
                self.write_bank().current_mut().toggle_accent(step)?;
                self.show();
            }
            Command::Clear(instrument) => {
                self.write_bank().current_mut().clear_row(instrument);
                self.show();
            }
            Command::Set(instrument, kind, value) => {
                let stored = self.params.set(instrument, kind, value)?;
                println!("{instrument} {kind:?} = {stored:.2}");
            }
            Command::Reset(instrument) => self.params.reset(instrument),
            Command::Tempo(bpm) => {
                let tempo = Tempo::new(bpm)?;
                self.write_bank().current_mut().bpm = tempo.bpm();
                self.retempo()?;
            }
            Command::Show => self.show(),
            Command::Save(path) => {
                let json = self.read_bank().to_json()?;
                fs::write(&path, json).wrap_err_with(|| format!("failed to write {path}"))?;
                println!("saved bank to {path}");
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
        Ok(())
    }

    fn play(&mut self) -> EyreResult<()> {
        let tempo = Tempo::new(self.read_bank().current().bpm)?;
        let player = Arc::clone(&self.player);

        let started = self.driver.start(tempo, move |step: usize, time: f64| {
            player
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .play_step(step, time);
        });
        if started {
            info!("playing at {} bpm", tempo.bpm());
        } else {
            warn!("already playing");
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.driver.stop();
        self.playback
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .is_playing = false;
    }

    /// The scheduler's tempo is fixed per run, so a tempo change restarts it.
    fn retempo(&mut self) -> EyreResult<()> {
        if self.driver.is_running() {
            self.stop();
            self.play()?;
        }
        Ok(())
    }

    fn show(&self) {
        let bank = self.read_bank();
        let playing = *self.playback.read().unwrap_or_else(PoisonError::into_inner);
        println!(
            "[{}] {} - {} BPM{}",
            bank.current_slot(),
            bank.current().name,
            bank.current().bpm,
            if playing.is_playing { " (playing)" } else { "" }
        );
        print!("{}", grid(bank.current()));
    }

    fn read_bank(&self) -> std::sync::RwLockReadGuard<'_, PatternBank> {
        self.bank.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_bank(&self) -> std::sync::RwLockWriteGuard<'_, PatternBank> {
        self.bank.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn prompt() -> EyreResult<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

/// Text grid of the pattern, one row per instrument plus the accent row.
fn grid(pattern: &Pattern) -> String {
    let cells = |row: &dyn Fn(usize) -> bool| -> String {
        (0..STEPS)
            .map(|step| if row(step) { " ■" } else { " □" })
            .collect()
    };

    let mut out = String::new();
    for instrument in Instrument::ALL {
        let row = cells(&|step| pattern.is_active(instrument, step));
        out.push_str(&format!("  {}{row}\n", instrument.code()));
    }
    out.push_str(&format!("  AC{}\n", cells(&|step| pattern.is_accented(step))));
    out
}
