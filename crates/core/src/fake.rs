//! A deterministic in-memory stand-in for a GL context.
//!
//! `FakeGl` keeps a shader/program namespace and an error queue with the
//! same observable rules as a real driver for the calls in [`GlApi`]:
//! unknown names raise `GL_INVALID_VALUE`, deleting an attached shader only
//! flags it until it is detached, and name `0` is silently ignored by the
//! delete calls. Its "compiler" and "linker" are intentionally tiny but
//! produce driver-style info logs.
//!
//! Available under `cfg(test)` and with the `fake` feature.

use crate::api::{GlApi, INVALID_OPERATION, INVALID_VALUE, NO_ERROR};
use crate::stage::ShaderStage;
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug)]
struct FakeShader {
    stage: ShaderStage,
    source: String,
    compiled: bool,
    log: String,
    flagged_for_delete: bool,
}

#[derive(Debug, Default)]
struct FakeProgram {
    attached: Vec<u32>,
    linked: bool,
    log: String,
}

#[derive(Debug)]
struct State {
    next_name: u32,
    shaders: BTreeMap<u32, FakeShader>,
    programs: BTreeMap<u32, FakeProgram>,
    errors: VecDeque<u32>,
    refuse_shader_creation: bool,
    refuse_program_creation: bool,
    blank_link_logs: bool,
    errors_after_compile: Vec<u32>,
    shaders_created: usize,
    programs_created: usize,
}

/// Software double of the shader/program part of a GL context.
#[derive(Debug)]
pub struct FakeGl {
    state: RefCell<State>,
}

impl Default for FakeGl {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeGl {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(State {
                next_name: 1,
                shaders: BTreeMap::new(),
                programs: BTreeMap::new(),
                errors: VecDeque::new(),
                refuse_shader_creation: false,
                refuse_program_creation: false,
                blank_link_logs: false,
                errors_after_compile: Vec::new(),
                shaders_created: 0,
                programs_created: 0,
            }),
        }
    }

    /// Makes every later `create_shader` fail.
    pub fn refuse_shader_creation(&self, refuse: bool) {
        self.state.borrow_mut().refuse_shader_creation = refuse;
    }

    /// Makes every later `create_program` fail.
    pub fn refuse_program_creation(&self, refuse: bool) {
        self.state.borrow_mut().refuse_program_creation = refuse;
    }

    /// Makes failed links leave an empty info log, as some drivers do.
    pub fn blank_link_logs(&self, blank: bool) {
        self.state.borrow_mut().blank_link_logs = blank;
    }

    /// Queues `code` to be raised by the next `compile_shader` call.
    pub fn fail_next_compile_with(&self, code: u32) {
        self.state.borrow_mut().errors_after_compile.push(code);
    }

    /// Appends `code` to the pending-error queue.
    pub fn push_error(&self, code: u32) {
        self.state.borrow_mut().errors.push_back(code);
    }

    pub fn pending_errors(&self) -> usize {
        self.state.borrow().errors.len()
    }

    /// Shader names that still exist, including ones flagged for deletion.
    pub fn live_shaders(&self) -> usize {
        self.state.borrow().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state.borrow().programs.len()
    }

    /// Total successful `create_shader` calls.
    pub fn shaders_created(&self) -> usize {
        self.state.borrow().shaders_created
    }

    /// Total successful `create_program` calls.
    pub fn programs_created(&self) -> usize {
        self.state.borrow().programs_created
    }

    /// Mirrors `glIsShader`: true until the object is really gone.
    pub fn is_shader(&self, name: u32) -> bool {
        self.state.borrow().shaders.contains_key(&name)
    }

    pub fn is_program(&self, name: u32) -> bool {
        self.state.borrow().programs.contains_key(&name)
    }

    /// Shaders currently attached to `program`, in attach order.
    pub fn attached_shaders(&self, program: u32) -> Vec<u32> {
        self.state
            .borrow()
            .programs
            .get(&program)
            .map(|p| p.attached.clone())
            .unwrap_or_default()
    }
}

impl State {
    fn raise(&mut self, code: u32) {
        self.errors.push_back(code);
    }

    fn alloc_name(&mut self) -> u32 {
        let name = self.next_name;
        self.next_name += 1;
        name
    }

    fn detach(&mut self, program: u32, shader: u32) {
        let Some(p) = self.programs.get_mut(&program) else {
            self.raise(INVALID_VALUE);
            return;
        };
        let Some(pos) = p.attached.iter().position(|&s| s == shader) else {
            self.raise(INVALID_OPERATION);
            return;
        };
        p.attached.remove(pos);
        self.collect_flagged(shader);
    }

    fn collect_flagged(&mut self, shader: u32) {
        let flagged = self
            .shaders
            .get(&shader)
            .is_some_and(|s| s.flagged_for_delete);
        let still_attached = self
            .programs
            .values()
            .any(|p| p.attached.contains(&shader));
        if flagged && !still_attached {
            self.shaders.remove(&shader);
        }
    }
}

impl GlApi for FakeGl {
    type Shader = u32;
    type Program = u32;

    fn create_shader(&self, stage: ShaderStage) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        if state.refuse_shader_creation {
            return Err("Unable to create Shader object".to_owned());
        }
        let name = state.alloc_name();
        state.shaders_created += 1;
        state.shaders.insert(
            name,
            FakeShader {
                stage,
                source: String::new(),
                compiled: false,
                log: String::new(),
                flagged_for_delete: false,
            },
        );
        Ok(name)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        let mut state = self.state.borrow_mut();
        match state.shaders.get_mut(&shader) {
            Some(s) => s.source = source.to_owned(),
            None => state.raise(INVALID_VALUE),
        }
    }

    fn compile_shader(&self, shader: u32) {
        let mut state = self.state.borrow_mut();
        let injected = std::mem::take(&mut state.errors_after_compile);
        match state.shaders.get_mut(&shader) {
            Some(s) => match check_source(&s.source) {
                Ok(()) => {
                    s.compiled = true;
                    s.log.clear();
                }
                Err(log) => {
                    s.compiled = false;
                    s.log = log;
                }
            },
            None => state.raise(INVALID_VALUE),
        }
        state.errors.extend(injected);
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let mut state = self.state.borrow_mut();
        match state.shaders.get(&shader) {
            Some(s) => s.compiled,
            None => {
                state.raise(INVALID_VALUE);
                false
            }
        }
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let mut state = self.state.borrow_mut();
        match state.shaders.get(&shader) {
            Some(s) => s.log.clone(),
            None => {
                state.raise(INVALID_VALUE);
                String::new()
            }
        }
    }

    fn delete_shader(&self, shader: u32) {
        if shader == 0 {
            return;
        }
        let mut state = self.state.borrow_mut();
        if !state.shaders.contains_key(&shader) {
            state.raise(INVALID_VALUE);
            return;
        }
        let attached = state.programs.values().any(|p| p.attached.contains(&shader));
        if !attached {
            state.shaders.remove(&shader);
        } else if let Some(s) = state.shaders.get_mut(&shader) {
            s.flagged_for_delete = true;
        }
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut state = self.state.borrow_mut();
        if state.refuse_program_creation {
            return Err("Unable to create Program object".to_owned());
        }
        let name = state.alloc_name();
        state.programs_created += 1;
        state.programs.insert(name, FakeProgram::default());
        Ok(name)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        let mut state = self.state.borrow_mut();
        if !state.shaders.contains_key(&shader) {
            state.raise(INVALID_VALUE);
            return;
        }
        let Some(p) = state.programs.get_mut(&program) else {
            state.raise(INVALID_VALUE);
            return;
        };
        if p.attached.contains(&shader) {
            state.raise(INVALID_OPERATION);
        } else {
            p.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.state.borrow_mut().detach(program, shader);
    }

    fn link_program(&self, program: u32) {
        let mut state = self.state.borrow_mut();
        let Some(p) = state.programs.get(&program) else {
            state.raise(INVALID_VALUE);
            return;
        };
        let stages: Vec<&FakeShader> = p
            .attached
            .iter()
            .filter_map(|name| state.shaders.get(name))
            .collect();
        let outcome = check_link(&stages);
        let blank = state.blank_link_logs;
        if let Some(p) = state.programs.get_mut(&program) {
            match outcome {
                Ok(()) => {
                    p.linked = true;
                    p.log.clear();
                }
                Err(log) => {
                    p.linked = false;
                    p.log = if blank { String::new() } else { log };
                }
            }
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        let mut state = self.state.borrow_mut();
        match state.programs.get(&program) {
            Some(p) => p.linked,
            None => {
                state.raise(INVALID_VALUE);
                false
            }
        }
    }

    fn program_info_log(&self, program: u32) -> String {
        let mut state = self.state.borrow_mut();
        match state.programs.get(&program) {
            Some(p) => p.log.clone(),
            None => {
                state.raise(INVALID_VALUE);
                String::new()
            }
        }
    }

    fn delete_program(&self, program: u32) {
        if program == 0 {
            return;
        }
        let mut state = self.state.borrow_mut();
        match state.programs.remove(&program) {
            Some(p) => {
                for shader in p.attached {
                    state.collect_flagged(shader);
                }
            }
            None => state.raise(INVALID_VALUE),
        }
    }

    fn get_error(&self) -> u32 {
        self.state
            .borrow_mut()
            .errors
            .pop_front()
            .unwrap_or(NO_ERROR)
    }
}

/// The toy compiler: blank source, `#error`, unbalanced braces and a missing
/// `main` are rejected.
fn check_source(source: &str) -> Result<(), String> {
    if source.trim().is_empty() {
        return Err("ERROR: 0:1: '' : syntax error: empty shader source\n".to_owned());
    }

    let mut depth: i64 = 0;
    for (idx, line) in source.lines().enumerate() {
        let line_no = idx + 1;
        if let Some(rest) = line.trim_start().strip_prefix("#error") {
            return Err(format!("ERROR: 0:{line_no}: '#error' : {}\n", rest.trim()));
        }
        for ch in line.chars() {
            match ch {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return Err(format!("ERROR: 0:{line_no}: '}}' : syntax error\n"));
            }
        }
    }
    if depth != 0 {
        let last = source.lines().count().max(1);
        return Err(format!(
            "ERROR: 0:{last}: '' : syntax error: unexpected end of file\n"
        ));
    }

    if !source.contains("void main") {
        return Err("ERROR: 0:1: 'main' : missing entry point: function 'main' is not defined\n".to_owned());
    }

    Ok(())
}

/// The toy linker: one compiled shader per stage, and every fragment input
/// fed by a vertex output of the same name.
fn check_link(shaders: &[&FakeShader]) -> Result<(), String> {
    let vertex: Vec<_> = shaders
        .iter()
        .filter(|s| s.stage == ShaderStage::Vertex)
        .collect();
    let fragment: Vec<_> = shaders
        .iter()
        .filter(|s| s.stage == ShaderStage::Fragment)
        .collect();

    if let Some(bad) = shaders.iter().find(|s| !s.compiled) {
        return Err(format!(
            "error: linking with uncompiled/unspecialized {} shader\n",
            bad.stage
        ));
    }
    match (vertex.as_slice(), fragment.as_slice()) {
        ([v], [f]) => {
            let outputs = declared(&v.source, "out");
            for input in declared(&f.source, "in") {
                if !outputs.contains(&input) {
                    return Err(format!(
                        "error: fragment shader input '{input}' has no matching vertex shader output\n"
                    ));
                }
            }
            Ok(())
        }
        ([], _) => Err("error: no vertex shader attached to program\n".to_owned()),
        (_, []) => Err("error: no fragment shader attached to program\n".to_owned()),
        _ => Err("error: too many shaders attached for a single stage\n".to_owned()),
    }
}

/// Names declared at line start as `<qualifier> <type> <name>;`.
fn declared(source: &str, qualifier: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let mut words = line.trim().trim_end_matches(';').split_whitespace();
            if words.next()? != qualifier {
                return None;
            }
            let _ty = words.next()?;
            words.next().map(String::from)
        })
        .collect()
}
