// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

const EXECUTED: &str = r##"{
  "cells": [
    {"cell_type": "markdown", "metadata": {}, "source": ["# Title"]},
    {"cell_type": "code", "execution_count": 1, "metadata": {}, "source": ["print(1)"],
     "outputs": [{"output_type": "stream", "name": "stdout", "text": ["1\n"]}]},
    {"cell_type": "code", "execution_count": 2, "metadata": {}, "source": ["1/0"],
     "outputs": [{"output_type": "error", "ename": "ZeroDivisionError",
                  "evalue": "division by zero", "traceback": []}]}
  ],
  "metadata": {
    "kernelspec": {"display_name": "Python 3", "language": "python", "name": "python3"}
  },
  "nbformat": 4,
  "nbformat_minor": 4
}"##;

#[test]
fn reads_declared_kernel() {
    let kernel = declared_kernel(EXECUTED).unwrap();
    assert_eq!(kernel.name(), "python3");
    assert_eq!(kernel.language(), "python");
}

#[test]
fn missing_kernelspec_is_empty() {
    let kernel = declared_kernel(r#"{"cells": [], "metadata": {}}"#).unwrap();
    assert_eq!(kernel, DeclaredKernel::default());
    assert_eq!(kernel.name(), "");
}

#[test]
fn null_language_is_empty() {
    let kernel =
        declared_kernel(r#"{"metadata": {"kernelspec": {"name": "x", "language": null}}}"#)
            .unwrap();
    assert_eq!(kernel.language(), "");
}

#[test]
fn finds_error_outputs() {
    let errors = error_outputs(EXECUTED).unwrap();
    assert_eq!(
        errors,
        vec![CellError {
            cell: 2,
            ename: "ZeroDivisionError".to_string(),
            evalue: "division by zero".to_string(),
        }]
    );
}

#[test]
fn invalid_json_is_an_error() {
    assert!(declared_kernel("not a notebook").is_err());
}

#[test]
fn output_path_mirrors_relative_path() {
    let out = output_path(Path::new("/io"), Path::new("sub/a.ipynb"), Path::new("/home/jovyan"));
    assert_eq!(out, Path::new("/io/notebooks/sub/a.ipynb"));
}

#[test]
fn output_path_strips_working_directory() {
    let out = output_path(
        Path::new("/io"),
        Path::new("/home/jovyan/sub/a.ipynb"),
        Path::new("/home/jovyan"),
    );
    assert_eq!(out, Path::new("/io/notebooks/sub/a.ipynb"));
}

#[test]
fn output_path_never_escapes_output_dir() {
    let out = output_path(Path::new("/io"), Path::new("/etc/a.ipynb"), Path::new("/home/jovyan"));
    assert_eq!(out, Path::new("/io/notebooks/etc/a.ipynb"));
}
