//! Event assembly from one line group
//!
//! The assembler walks a group of lines once. Header lines are consumed until
//! the first phase-tagged line; every line from there on is phase data dated
//! from the event's first main header.

use std::sync::Arc;
use tracing::{debug, warn};

use super::classifier::{classify, header_boundary, tag_of};
use super::convert;
use super::extractor::{
    RawError, RawMacroseismic, RawMain, RawPhase, extract_comment, extract_root_reference,
    extract_waveform,
};
use super::fixups;
use super::validation::validate_integer;
use crate::config::NordicConfig;
use crate::constants::tags;
use crate::error::{NordicError, Result};
use crate::models::{Event, RecordKind, SolutionType};
use crate::resolver::{DetachedResolver, RootEventResolver};

/// Progress of the assembler through a line group
///
/// Main and error lines get their own states, carrying the line index, so
/// that the binding of an error header to its main header is an explicit
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    ScanningHeaders,
    AssemblingMain(usize),
    AttachingError(usize),
    EmittingPhaseData,
    Done,
}

/// In-progress assembly of a single event
struct Assembly<'a> {
    state: AssemblyState,
    event: Event,
    /// Index of the main header an error line binds to
    attach_target: Option<usize>,
    /// Raw depth control of the attach target, read by the error fixups
    attach_depth_control: String,
    resolver: &'a dyn RootEventResolver,
    apply_fixes: bool,
}

impl<'a> Assembly<'a> {
    fn main(&mut self, line: &str) -> Result<()> {
        let mut raw = RawMain::extract(line)?;
        if self.apply_fixes {
            fixups::fix_main(&mut raw);
        }
        let main = convert::main_header(&raw, line)?;
        self.event.main_headers.push(main);
        self.attach_target = Some(self.event.main_headers.len() - 1);
        self.attach_depth_control = raw.depth_control;
        Ok(())
    }

    fn attach_error(&mut self, line: &str) -> Result<()> {
        let target = self.attach_target.ok_or_else(|| NordicError::OrphanError {
            line: line.to_string(),
        })?;
        let mut raw = RawError::extract(line)?;
        if self.apply_fixes {
            fixups::fix_error(&mut raw, &self.attach_depth_control);
        }
        let error = convert::error_header(&raw)?;
        let main = &mut self.event.main_headers[target];
        if main.error_header.is_some() {
            warn!(
                "Main header {} has a second error header, keeping the later one",
                target + 1
            );
        }
        main.error_header = Some(error);
        Ok(())
    }

    fn header(&mut self, kind: RecordKind, line: &str) -> Result<()> {
        match kind {
            RecordKind::Macroseismic => {
                let raw = RawMacroseismic::extract(line)?;
                let macroseismic = convert::macroseismic_header(&raw)?;
                self.event.macroseismic_headers.push(macroseismic);
            }
            RecordKind::Comment => {
                let comment = convert::comment_header(&extract_comment(line)?)?;
                self.event.comment_headers.push(comment);
            }
            RecordKind::Waveform => {
                let waveform = convert::waveform_header(&extract_waveform(line)?)?;
                self.event.waveform_headers.push(waveform);
            }
            RecordKind::Instruction => {
                let reference = extract_root_reference(line)?;
                let native_id: Option<i64> =
                    validate_integer(&reference, "root_event_id", Some(0), None, kind)?;
                match native_id {
                    Some(native_id) => {
                        self.event.root_id = self.resolver.resolve_root_id(native_id)?;
                        debug!("Root of native event {} is {}", native_id, self.event.root_id);
                    }
                    None => debug!("Instruction line without a root reference skipped"),
                }
            }
            // Main and error lines have states of their own, captions carry no
            // data and phase lines never precede the boundary
            RecordKind::Main
            | RecordKind::Error
            | RecordKind::PhaseCaption
            | RecordKind::PhaseData => {}
        }
        Ok(())
    }

    fn phase(&mut self, line: &str) -> Result<()> {
        // Lines without a tag column fail here as malformed phase lines
        let mut raw = RawPhase::extract(line)?;
        raw.reference_date = self
            .event
            .first_main()
            .and_then(|main| main.reference_datetime())
            .map(|reference| reference.date());

        if self.apply_fixes {
            fixups::fix_phase(&mut raw);
        }
        // The day offset is part of the absolute time, with or without fixups
        fixups::apply_day_offset(&mut raw);

        let phase = convert::phase_data(&raw)?;
        self.event.phase_data.push(phase);
        Ok(())
    }
}

/// Builds one [`Event`] per line group
#[derive(Clone)]
pub struct EventAssembler {
    resolver: Arc<dyn RootEventResolver>,
    apply_fixes: bool,
    solution_type: SolutionType,
}

impl EventAssembler {
    pub fn new(resolver: Arc<dyn RootEventResolver>) -> Self {
        Self {
            resolver,
            apply_fixes: true,
            solution_type: SolutionType::default(),
        }
    }

    pub fn from_config(config: &NordicConfig, resolver: Arc<dyn RootEventResolver>) -> Self {
        Self {
            resolver,
            apply_fixes: config.apply_fixes,
            solution_type: config.solution_type,
        }
    }

    pub fn with_fixes(mut self, apply_fixes: bool) -> Self {
        self.apply_fixes = apply_fixes;
        self
    }

    pub fn with_solution_type(mut self, solution_type: SolutionType) -> Self {
        self.solution_type = solution_type;
        self
    }

    pub fn applies_fixes(&self) -> bool {
        self.apply_fixes
    }

    /// Assemble one event from a line group
    ///
    /// Any failing line aborts the whole group. A group without a main header
    /// fails with [`NordicError::NoHeaders`] (or [`NordicError::OrphanError`]
    /// when it carries an error line) before any of its lines are converted.
    pub fn assemble<S: AsRef<str>>(&self, lines: &[S]) -> Result<Event> {
        let boundary = header_boundary(lines);
        check_main_present(&lines[..boundary], lines.len())?;

        let mut assembly = Assembly {
            state: AssemblyState::ScanningHeaders,
            event: Event::new(self.solution_type),
            attach_target: None,
            attach_depth_control: String::new(),
            resolver: self.resolver.as_ref(),
            apply_fixes: self.apply_fixes,
        };

        let mut position = 0;
        while assembly.state != AssemblyState::Done {
            match assembly.state {
                AssemblyState::ScanningHeaders => {
                    if position == boundary {
                        assembly.state = AssemblyState::EmittingPhaseData;
                        continue;
                    }
                    let line = lines[position].as_ref();
                    match classify(line)? {
                        RecordKind::Main => {
                            assembly.state = AssemblyState::AssemblingMain(position);
                        }
                        RecordKind::Error => {
                            assembly.state = AssemblyState::AttachingError(position);
                        }
                        kind => {
                            assembly.header(kind, line)?;
                            position += 1;
                        }
                    }
                }
                AssemblyState::AssemblingMain(index) => {
                    assembly.main(lines[index].as_ref())?;
                    position = index + 1;
                    assembly.state = AssemblyState::ScanningHeaders;
                }
                AssemblyState::AttachingError(index) => {
                    assembly.attach_error(lines[index].as_ref())?;
                    position = index + 1;
                    assembly.state = AssemblyState::ScanningHeaders;
                }
                AssemblyState::EmittingPhaseData => {
                    match lines.get(position) {
                        Some(line) => {
                            assembly.phase(line.as_ref())?;
                            position += 1;
                        }
                        None => assembly.state = AssemblyState::Done,
                    }
                }
                AssemblyState::Done => {}
            }
        }

        let event = assembly.event;
        debug!(
            "Assembled event: {} main, {} macroseismic, {} comment, {} waveform, {} phase",
            event.main_headers.len(),
            event.macroseismic_headers.len(),
            event.comment_headers.len(),
            event.waveform_headers.len(),
            event.phase_data.len()
        );
        Ok(event)
    }
}

/// Fail a header block that has no main-tagged line
fn check_main_present<S: AsRef<str>>(headers: &[S], group_length: usize) -> Result<()> {
    let tagged = |tag: char| {
        headers
            .iter()
            .map(|line| line.as_ref())
            .find(|line| tag_of(line) == Some(tag))
    };
    if tagged(tags::MAIN).is_some() {
        return Ok(());
    }
    match tagged(tags::ERROR) {
        Some(line) => Err(NordicError::OrphanError {
            line: line.to_string(),
        }),
        None => Err(NordicError::NoHeaders {
            lines: group_length,
        }),
    }
}

impl Default for EventAssembler {
    fn default() -> Self {
        Self::new(Arc::new(DetachedResolver))
    }
}

impl std::fmt::Debug for EventAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventAssembler")
            .field("apply_fixes", &self.apply_fixes)
            .field("solution_type", &self.solution_type)
            .finish_non_exhaustive()
    }
}
