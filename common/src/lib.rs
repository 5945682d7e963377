//! Monkey Lab Common Library
//!
//! CLIとWeb(WASM)で共有される画面状態・バリデーション・模擬推論

pub mod error;
pub mod species;
pub mod upload;
pub mod classify;
pub mod logbook;

#[cfg(test)]
mod testing;

pub use error::{Error, Field, Result};
pub use species::{GUIDANCE, SPECIES};
pub use upload::{is_image_type, ImageSource, PreviewHandle, PreviewSource, UploadState};
pub use classify::{
    simulate_prediction, ClassificationResult, Classifier, ClassifierView, ClassifyPhase,
    ClassifyTicket, Delay, Prediction, RandomSource, RngSource, SimulatedClassifier,
    StdRandom, SIMULATED_LATENCY,
};
pub use logbook::{
    encode_data_uri, DataUriReader, Logbook, LogbookPhase, ObservationDetail, ObservationRecord,
    SaveTicket,
};
