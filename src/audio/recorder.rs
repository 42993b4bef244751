use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::AudioError;

/// 录音状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Recording,
}

/// What the capture worker reports back once it has opened the device.
enum WorkerEvent {
    Ready,
    Failed(AudioError),
}

/// 音频录制器
///
/// Captures from the default input device on a dedicated worker thread,
/// downmixed to mono and resampled to 16 kHz. `start` blocks until the
/// worker has the stream open, so device failures surface to the caller
/// instead of dying silently on the worker.
pub struct AudioRecorder {
    buffer: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
    state: RecordingState,
    stop_tx: Option<mpsc::Sender<()>>,
    worker_handle: Option<JoinHandle<()>>,
}

impl AudioRecorder {
    pub fn new() -> Self {
        Self {
            buffer: Arc::new(Mutex::new(Vec::new())),
            sample_rate: 16000, // Whisper 需要 16kHz
            state: RecordingState::Idle,
            stop_tx: None,
            worker_handle: None,
        }
    }

    /// 开始录音
    pub fn start(&mut self) -> Result<(), AudioError> {
        if self.state == RecordingState::Recording {
            return Ok(());
        }

        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (event_tx, event_rx) = mpsc::channel::<WorkerEvent>();

        let buffer = self.buffer.clone();
        let target_sample_rate = self.sample_rate;

        let handle = thread::spawn(move || {
            run_capture_loop(stop_rx, event_tx, buffer, target_sample_rate);
        });

        // Wait for the worker to open the stream before reporting success.
        match event_rx.recv() {
            Ok(WorkerEvent::Ready) => {}
            Ok(WorkerEvent::Failed(e)) => {
                handle.join().ok();
                return Err(e);
            }
            Err(_) => {
                handle.join().ok();
                return Err(AudioError::Device("capture worker exited".to_string()));
            }
        }

        self.stop_tx = Some(stop_tx);
        self.worker_handle = Some(handle);
        self.state = RecordingState::Recording;

        tracing::info!("Recording started");
        Ok(())
    }

    /// 停止录音并返回采样数据
    ///
    /// The input stream is released before the buffer is handed back, so a
    /// returned recording is always fully finalized.
    pub fn stop(&mut self) -> Result<Vec<f32>, AudioError> {
        if self.state != RecordingState::Recording {
            return Ok(Vec::new());
        }

        if let Some(tx) = self.stop_tx.take() {
            tx.send(()).ok();
        }
        if let Some(handle) = self.worker_handle.take() {
            handle.join().ok();
        }

        self.state = RecordingState::Idle;

        let data = self
            .buffer
            .lock()
            .map(|buffer| buffer.clone())
            .unwrap_or_default();

        tracing::info!("Recording stopped, {} samples collected", data.len());
        Ok(data)
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

impl Default for AudioRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// 在工作线程中运行采集循环
fn run_capture_loop(
    stop_rx: mpsc::Receiver<()>,
    event_tx: mpsc::Sender<WorkerEvent>,
    buffer: Arc<Mutex<Vec<f32>>>,
    target_sample_rate: u32,
) {
    let stream = match open_input_stream(buffer, target_sample_rate) {
        Ok(stream) => stream,
        Err(e) => {
            event_tx.send(WorkerEvent::Failed(e)).ok();
            return;
        }
    };

    if let Err(e) = stream.play() {
        event_tx
            .send(WorkerEvent::Failed(AudioError::Stream(e.to_string())))
            .ok();
        return;
    }

    event_tx.send(WorkerEvent::Ready).ok();

    loop {
        match stop_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
        }
    }

    // 流在 drop 时停止
    drop(stream);
    tracing::info!("Audio stream stopped");
}

fn open_input_stream(
    buffer: Arc<Mutex<Vec<f32>>>,
    target_sample_rate: u32,
) -> Result<cpal::Stream, AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or(AudioError::NoInputDevice)?;

    let config = device
        .default_input_config()
        .map_err(|e| AudioError::Device(e.to_string()))?;

    tracing::info!(
        "Using input device: {:?}, config: {:?}",
        device.name(),
        config
    );

    let source_sample_rate = config.sample_rate().0;
    let channels = config.channels() as usize;
    let resample_ratio = source_sample_rate as f64 / target_sample_rate as f64;

    tracing::info!(
        "Resampling: {}Hz -> {}Hz, ratio: {:.4}",
        source_sample_rate,
        target_sample_rate,
        resample_ratio
    );

    // 使用浮点累加器实现精确重采样
    let accumulator = Arc::new(Mutex::new(0.0f64));

    let stream = device
        .build_input_stream(
            &config.into(),
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                let (Ok(mut buffer), Ok(mut acc)) = (buffer.lock(), accumulator.lock()) else {
                    return;
                };

                // 转换为单声道并精确重采样
                for frame in data.chunks(channels) {
                    let mono: f32 = frame.iter().sum::<f32>() / channels as f32;

                    *acc += 1.0 / resample_ratio;
                    while *acc >= 1.0 {
                        buffer.push(mono);
                        *acc -= 1.0;
                    }
                }
            },
            |err| {
                tracing::error!("Audio stream error: {}", err);
            },
            None,
        )
        .map_err(|e| AudioError::Stream(e.to_string()))?;

    Ok(stream)
}
