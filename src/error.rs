pub type BoxedGatewayError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// Any error reported by the user-supplied `ShaderCompilerGateway`
    #[error("shader compiler gateway error: \"{cause:?}\" when processing {shader:?}")]
    Gateway {
        /// Shader the gateway was asked about
        shader: String,

        cause: BoxedGatewayError,
    },

    /// Reading a transcript or config file failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be decoded
    #[cfg(feature = "cli")]
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}
