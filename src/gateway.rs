use serde::Serialize;

use crate::diagnostics::ShaderMessage;
use crate::BoxedGatewayError;

/// Keywords a shader declares, as reported by the toolchain
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShaderDetails {
    /// Number of variants the toolchain expects to produce
    pub variant_count: u64,
    pub global_keywords: Vec<String>,
    pub local_keywords: Vec<String>,
}

/// Preprocessed output of all variants of a shader
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreprocessedTranscript {
    /// Where the toolchain wrote the transcript, for opening it externally
    pub path: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompileRequest {
    pub keywords: Vec<String>,
    pub platform: String,
    pub build_target: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StageOutput {
    pub stage: String,
    pub texture_bindings: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompileResult {
    pub messages: Vec<ShaderMessage>,

    /// Stages which produced compiled output
    pub stages: Vec<StageOutput>,
}

/// User-supplied access to the shader toolchain
pub trait ShaderCompilerGateway {
    type Shader;

    /// Path of the shader's own source file; `#line` directives without a file refer to it.
    fn source_path(&self, shader: &Self::Shader) -> String;

    fn messages(&mut self, shader: &Self::Shader) -> Result<Vec<ShaderMessage>, BoxedGatewayError>;

    fn shader_details(&mut self, shader: &Self::Shader) -> Result<ShaderDetails, BoxedGatewayError>;

    /// Preprocess all variants of `shader`. `Ok(None)` when the toolchain produced no output.
    fn open_preprocessed(
        &mut self,
        shader: &Self::Shader,
    ) -> Result<Option<PreprocessedTranscript>, BoxedGatewayError>;

    fn compile(
        &mut self,
        shader: &Self::Shader,
        request: &CompileRequest,
    ) -> Result<CompileResult, BoxedGatewayError>;
}
