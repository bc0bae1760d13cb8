use std::time::Instant;

use kiss3d::event::{Action, Event, Key, WindowEvent};
use log::info;

const KEY_QUIT: Key = Key::Escape;

pub struct Controller {
    quit_requested: bool,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            quit_requested: false,
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn process_event(&mut self, event: Event) {
        self.process_window_event(&event.value);
    }

    fn process_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::Key(KEY_QUIT, Action::Press, _) => {
                info!("Escape pressed, quitting");
                self.quit_requested = true;
            }
            WindowEvent::Close => {
                info!("Window closed, quitting");
                self.quit_requested = true;
            }
            _ => {}
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}
