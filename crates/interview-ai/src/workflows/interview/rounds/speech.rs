//! Voice dictation support for the free-text rounds.
//!
//! Dictation is a capability, not a requirement: hosts without a speech
//! backend plug in [`NullSpeechCapture`] and the toggle stays inert.

/// A speech-to-text backend. Implementations report availability up front
/// and receive start/stop signals as the candidate toggles dictation.
pub trait SpeechCapture: Send + Sync {
    fn is_available(&self) -> bool;
    fn start(&self);
    fn stop(&self);
}

/// Capture backend for hosts without speech support. Never available, so
/// dictation degrades silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSpeechCapture;

impl SpeechCapture for NullSpeechCapture {
    fn is_available(&self) -> bool {
        false
    }

    fn start(&self) {}

    fn stop(&self) {}
}

/// Listening state for one round. Transcript segments append to the answer
/// buffer only while the flag is set; ending a round for any reason clears
/// the flag.
#[derive(Debug, Default)]
pub struct Dictation {
    listening: bool,
}

impl Dictation {
    /// Flips the listening state. Returns the new state, which stays `false`
    /// when the backend is unavailable.
    pub fn toggle(&mut self, capture: &dyn SpeechCapture) -> bool {
        if !capture.is_available() {
            self.listening = false;
            return false;
        }
        if self.listening {
            capture.stop();
            self.listening = false;
        } else {
            capture.start();
            self.listening = true;
        }
        self.listening
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Appends a recognized segment plus a single trailing space, but only
    /// while listening.
    pub fn append_transcript(&self, answer: &mut String, segment: &str) {
        if !self.listening {
            return;
        }
        answer.push_str(segment);
        answer.push(' ');
    }

    pub fn end(&mut self, capture: &dyn SpeechCapture) {
        if self.listening {
            capture.stop();
        }
        self.listening = false;
    }
}
