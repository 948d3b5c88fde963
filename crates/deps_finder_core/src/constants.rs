//! Constants for file roles and platform-provided modules.
//!
//! This module centralizes the fixed lists that decide which files are scanned
//! and which module names never count as installable packages.
//!
//! ## Supported Extensions
//!
//! - **TypeScript**: `.ts`, `.tsx`, `.mts` (ES module), `.cts` (CommonJS)
//! - **JavaScript**: `.js`, `.jsx`, `.mjs` (ES module), `.cjs` (CommonJS)
//!
//! Declaration files (`.d.ts`, `.d.mts`, `.d.cts`) carry no runtime code and are
//! never scanned.

/// File extensions for JavaScript/TypeScript files that should be analyzed
pub const JS_TS_EXTENSIONS: &[&str] = &[
    "ts",  // TypeScript
    "tsx", // TypeScript with JSX
    "mts", // TypeScript module
    "cts", // TypeScript CommonJS
    "js",  // JavaScript
    "jsx", // JavaScript with JSX
    "mjs", // JavaScript module
    "cjs", // JavaScript CommonJS
];

/// Suffixes of generated type declaration files
pub const DECLARATION_SUFFIXES: &[&str] = &[".d.ts", ".d.mts", ".d.cts"];

/// Filename patterns of bundler/framework configs that ship with the app
pub const PRODUCTION_CONFIG_PATTERNS: &[&str] = &[
    r"^next\.config\.(js|ts|mjs|cjs)$",
    r"^next-[^/]+\.config\.(js|ts|mjs|cjs)$",
    r"^webpack\.config\.(js|ts|mjs|cjs)$",
    r"^vite\.config\.(js|ts|mjs|cjs)$",
    r"^rollup\.config\.(js|ts|mjs|cjs)$",
    r"^postcss\.config\.(js|ts|mjs|cjs)$",
];

/// Filename prefixes of test-runner, linter and build-tool configs
pub const DEV_CONFIG_PREFIXES: &[&str] = &[
    "jest.config.",
    "vitest.config.",
    "babel.config.",
    "eslint.config.",
    "prettier.config.",
    "tsup.config.",
    "biome.config.",
];

/// Directory names whose contents are never application source
pub const EXCLUDED_DIRECTORIES: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "out",
    "test",
    "tests",
    "__tests__",
    "__mocks__",
    "stories",
    ".storybook",
    "coverage",
    "e2e",
    "cypress",
    "playwright",
    ".next",
    ".nuxt",
    ".turbo",
    ".cache",
    ".git",
    ".idea",
    ".vscode",
];

/// Filename fragments marking tests, stories and test setup
pub const EXCLUDED_FILENAME_PATTERNS: &[&str] = &[
    ".test.",
    ".spec.",
    ".stories.",
    ".story.",
    "testing-library.",
    "test-utils.",
    "setupTests.",
    "jest.setup.",
    "vitest.setup.",
    "happydom.",
];

/// Top-level directory suffixes that usually hold build output
pub const BUILD_DIR_SUFFIXES: &[&str] = &["-static", "-dist", "-build", "-output"];

/// Node.js core modules, importable with or without the `node:` prefix
pub const NODE_BUILTIN_MODULES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Node.js modules that only exist behind the `node:` prefix
pub const NODE_PREFIX_ONLY_MODULES: &[&str] = &["test", "sqlite", "sea"];

/// Bun runtime modules
pub const BUN_BUILTIN_MODULES: &[&str] = &["bun", "bun:test", "bun:sqlite", "bun:ffi", "bun:jsc"];

/// Packages left out of the unused and type-only lists; `/*` matches a whole scope
pub const DEFAULT_IGNORED_PACKAGES: &[&str] = &["typescript", "@types/*"];
