//! Tick-driven event engine
//!
//! [`Keypad`] owns the transport, every key state and the LED buffer. The
//! host calls [`Keypad::tick`] once per loop iteration; a tick:
//!
//! 1. Reads all raw key states from the transport
//! 2. Updates each key in index order, and for each key with an edge runs
//!    its handlers before the next key is looked at
//! 3. Wakes the LEDs on any activity
//! 4. Puts the LEDs to sleep once the idle timeout has passed since the
//!    last activity
//! 5. Flushes one LED frame to the transport
//!
//! Nothing happens between ticks. Handlers only get access to the LED of
//! the key that fired, through [`KeyContext`].

use core::convert::Infallible;

use heapless::Vec;

use crate::config::types::{check_brightness, secs_to_ms};
use crate::config::{ConfigError, KeypadConfig};
use crate::key::{Key, KEY_COUNT};
use crate::led::{LedBuffer, LedFrame, LedSlot, Rgb, SleepTimer};
use crate::registry::{CallbackRegistry, EventKind, Handler, HandlerId, RegistryError};
use crate::scan::{KeyState, TransitionKind};
use crate::time::Timestamp;
use crate::traits::KeypadTransport;

/// Errors returned from a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeypadError<T, H> {
    /// Reading keys or writing the LED frame failed
    Transport(T),
    /// A registered handler failed
    Handler {
        /// Key whose handler failed
        key: Key,
        /// Event being dispatched
        kind: EventKind,
        /// Error returned by the handler
        error: H,
    },
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Edge classified for each key, indexed by key number
    pub transitions: [TransitionKind; KEY_COUNT],
    /// LEDs were asleep and woke on this tick
    pub woke: bool,
    /// LEDs fell asleep on this tick
    pub fell_asleep: bool,
}

impl TickReport {
    /// Edge classified for one key
    pub fn transition(&self, key: Key) -> TransitionKind {
        self.transitions[key.index()]
    }

    /// Check if no key had an edge
    pub fn is_idle(&self) -> bool {
        !self.transitions.iter().any(TransitionKind::is_activity)
    }

    /// Keys with a given edge, in index order
    pub fn keys_with(&self, kind: TransitionKind) -> impl Iterator<Item = Key> + '_ {
        Key::all().filter(move |k| self.transitions[k.index()] == kind)
    }

    /// Number of keys with a given edge
    pub fn count(&self, kind: TransitionKind) -> usize {
        self.transitions.iter().filter(|t| **t == kind).count()
    }
}

/// Key-scoped view handed to handlers
///
/// Gives read access to the firing key's state and write access to its LED
/// only.
pub struct KeyContext<'a> {
    key: Key,
    state: &'a KeyState,
    led: LedSlot<'a>,
    now: Timestamp,
}

impl<'a> KeyContext<'a> {
    /// Create a context for one key
    pub fn new(key: Key, state: &'a KeyState, led: LedSlot<'a>, now: Timestamp) -> Self {
        Self {
            key,
            state,
            led,
            now,
        }
    }

    /// Key that fired
    pub fn key(&self) -> Key {
        self.key
    }

    /// Key number (0-15)
    pub fn number(&self) -> u8 {
        self.key.number()
    }

    /// Time of the tick being dispatched
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Check if the key is down
    pub fn is_pressed(&self) -> bool {
        self.state.is_pressed()
    }

    /// Check if the hold fired for the current press
    pub fn is_held(&self) -> bool {
        self.state.is_held()
    }

    /// Milliseconds since the key was last pressed
    pub fn time_since_last_press(&self) -> Option<u64> {
        self.state.time_since_last_press(self.now)
    }

    /// Overwrite the key's LED color
    pub fn set_led(&mut self, r: u8, g: u8, b: u8) {
        self.led.set_led(r, g, b);
    }

    /// Overwrite the key's LED color
    pub fn set_rgb(&mut self, color: Rgb) {
        self.led.set_rgb(color);
    }

    /// Turn the key's LED off
    pub fn led_off(&mut self) {
        self.led.led_off();
    }

    /// Restore the key's remembered LED color
    pub fn led_on(&mut self) {
        self.led.led_on();
    }

    /// Switch the key's LED between its color and off
    pub fn toggle_led(&mut self) {
        self.led.toggle_led();
    }

    /// Key's buffered LED color
    pub fn rgb(&self) -> Rgb {
        self.led.rgb()
    }

    /// Check if the key's LED is lit
    pub fn is_lit(&self) -> bool {
        self.led.is_lit()
    }
}

/// Keypad engine
///
/// # Type parameters
/// - `T`: hardware transport
/// - `C`: host context passed to every handler
/// - `E`: handler error type
pub struct Keypad<T, C = (), E = Infallible> {
    transport: T,
    keys: [KeyState; KEY_COUNT],
    leds: LedBuffer,
    registry: CallbackRegistry<C, E>,
    hold_duration_ms: u32,
}

impl<T: KeypadTransport, C, E> Keypad<T, C, E> {
    /// Create an engine with every key released and every LED off
    pub fn new(transport: T, config: KeypadConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            transport,
            keys: [KeyState::new(); KEY_COUNT],
            leds: LedBuffer::new(
                config.brightness_pct,
                SleepTimer::new(config.sleep_enabled, config.sleep_timeout_ms),
            ),
            registry: CallbackRegistry::new(),
            hold_duration_ms: config.hold_duration_ms,
        })
    }

    /// Run one scan/dispatch/flush cycle
    ///
    /// `now` must never go backwards between calls. A transport error or a
    /// handler error ends the tick immediately: keys after the failing one
    /// are not scanned and no frame is written.
    pub fn tick(&mut self, now: Timestamp, ctx: &mut C) -> Result<TickReport, KeypadError<T::Error, E>> {
        let raw = self
            .transport
            .read_raw_states()
            .map_err(KeypadError::Transport)?;

        let mut report = TickReport::default();

        for key in Key::all() {
            let i = key.index();
            let transition = self.keys[i].update(raw[i], now, self.hold_duration_ms);
            report.transitions[i] = transition;

            let Some(kind) = EventKind::from_transition(transition) else {
                continue;
            };

            for handler in self.registry.handlers_for(key, kind) {
                let mut key_ctx = KeyContext::new(key, &self.keys[i], self.leds.slot(key), now);
                handler(&mut key_ctx, ctx)
                    .map_err(|error| KeypadError::Handler { key, kind, error })?;
            }

            if self.leds.sleep_mut().record_activity(now) {
                report.woke = true;
                #[cfg(feature = "defmt")]
                defmt::debug!("LEDs woken by key {}", key.number());
            }
        }

        report.fell_asleep = self.leds.sleep_mut().evaluate(now);
        if report.fell_asleep {
            #[cfg(feature = "defmt")]
            defmt::debug!("LEDs asleep after {} ms idle", self.leds.sleep().timeout_ms());
        }

        let frame = self.leds.frame();
        self.transport
            .write_frame(&frame)
            .map_err(KeypadError::Transport)?;

        Ok(report)
    }

    /// Append a handler for a key event
    pub fn register(
        &mut self,
        key: Key,
        kind: EventKind,
        handler: Handler<C, E>,
    ) -> Result<HandlerId, RegistryError> {
        self.registry.register(key, kind, handler)
    }

    /// Append a press handler for a key
    pub fn on_press(&mut self, key: Key, handler: Handler<C, E>) -> Result<HandlerId, RegistryError> {
        self.register(key, EventKind::Press, handler)
    }

    /// Append a release handler for a key
    pub fn on_release(&mut self, key: Key, handler: Handler<C, E>) -> Result<HandlerId, RegistryError> {
        self.register(key, EventKind::Release, handler)
    }

    /// Append a hold handler for a key
    pub fn on_hold(&mut self, key: Key, handler: Handler<C, E>) -> Result<HandlerId, RegistryError> {
        self.register(key, EventKind::Hold, handler)
    }

    /// Remove a handler
    pub fn unregister(&mut self, id: HandlerId) -> bool {
        self.registry.unregister(id)
    }

    /// Handler table
    pub fn registry(&self) -> &CallbackRegistry<C, E> {
        &self.registry
    }

    /// Handle on one key's LED, for use between ticks
    pub fn led(&mut self, key: Key) -> LedSlot<'_> {
        self.leds.slot(key)
    }

    /// Set every key's LED to the same color
    pub fn set_all(&mut self, r: u8, g: u8, b: u8) {
        self.leds.set_all(Rgb::new(r, g, b));
    }

    /// Frame the next flush would send
    pub fn frame(&self) -> LedFrame {
        self.leds.frame()
    }

    /// State of one key
    pub fn key_state(&self, key: Key) -> &KeyState {
        &self.keys[key.index()]
    }

    /// Check if a key is down
    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys[key.index()].is_pressed()
    }

    /// Pressed state of every key, indexed by key number
    pub fn states(&self) -> [bool; KEY_COUNT] {
        let mut states = [false; KEY_COUNT];
        for (out, key) in states.iter_mut().zip(self.keys.iter()) {
            *out = key.is_pressed();
        }
        states
    }

    /// Keys currently down, in index order
    pub fn pressed_keys(&self) -> Vec<Key, KEY_COUNT> {
        Key::all().filter(|k| self.is_pressed(*k)).collect()
    }

    /// Check if no key is down
    pub fn none_pressed(&self) -> bool {
        !self.keys.iter().any(KeyState::is_pressed)
    }

    /// Check if the LEDs are blanked by the idle timer
    pub fn is_asleep(&self) -> bool {
        self.leds.sleep().is_asleep()
    }

    /// Enable or disable LED sleep
    pub fn set_sleep_enabled(&mut self, enabled: bool) {
        self.leds.sleep_mut().set_enabled(enabled);
    }

    /// Set the LED idle timeout in milliseconds
    pub fn set_sleep_timeout_ms(&mut self, timeout_ms: u32) {
        self.leds.sleep_mut().set_timeout_ms(timeout_ms);
    }

    /// Set the LED idle timeout in seconds
    pub fn set_sleep_timeout_s(&mut self, secs: f32) -> Result<(), ConfigError> {
        let ms = secs_to_ms(secs)?;
        self.set_sleep_timeout_ms(ms);
        Ok(())
    }

    /// Set the hold duration in milliseconds
    pub fn set_hold_duration_ms(&mut self, ms: u32) {
        self.hold_duration_ms = ms;
    }

    /// Set the hold duration in seconds
    pub fn set_hold_duration_s(&mut self, secs: f32) -> Result<(), ConfigError> {
        self.hold_duration_ms = secs_to_ms(secs)?;
        Ok(())
    }

    /// Set the global LED brightness (0-100%)
    pub fn set_brightness_pct(&mut self, pct: u8) -> Result<(), ConfigError> {
        self.leds.set_brightness_pct(check_brightness(pct)?);
        Ok(())
    }

    /// Current settings
    pub fn config(&self) -> KeypadConfig {
        let sleep = self.leds.sleep();
        KeypadConfig {
            hold_duration_ms: self.hold_duration_ms,
            sleep_enabled: sleep.is_enabled(),
            sleep_timeout_ms: sleep.timeout_ms(),
            brightness_pct: self.leds.brightness_pct(),
        }
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Underlying transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the engine and return the transport
    pub fn release(self) -> T {
        self.transport
    }
}
