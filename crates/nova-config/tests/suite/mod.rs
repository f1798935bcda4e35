mod diagnostics;
mod loading;
mod logging;
