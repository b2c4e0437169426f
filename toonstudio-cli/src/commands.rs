use anyhow::Context;
use std::io::{Read, Write};
use std::time::Duration;
use toonstudio_core::types::{ConversionOptions, DataFormat};
use toonstudio_engine::conversion::{ConversionState, ConversionWorkflow};
use toonstudio_engine::job::JobState;
use toonstudio_engine::query::{QueryInput, QueryState};
use toonstudio_engine::studio::Studio;
use toonstudio_engine::traits::Clipboard;

/// Reads a file, or stdin for `-`.
pub fn read_input(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(source).with_context(|| format!("read input: {source}"))
}

pub async fn status(studio: &Studio, out: &mut dyn Write) -> anyhow::Result<bool> {
    let st = studio.status.run().await;
    writeln!(out, "tracing connected: {}", yes_no(st.tracing_connected))?;
    writeln!(out, "llm configured:    {}", yes_no(st.llm_configured))?;
    Ok(true)
}

pub async fn health(studio: &Studio, out: &mut dyn Write) -> anyhow::Result<bool> {
    match studio.status.health().await {
        Ok(body) => {
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "error: {e}")?;
            Ok(false)
        }
    }
}

pub async fn convert(
    workflow: &ConversionWorkflow,
    source: String,
    options: Option<ConversionOptions>,
    clipboard: Option<&dyn Clipboard>,
    out: &mut dyn Write,
) -> anyhow::Result<bool> {
    workflow.set_source_text(source);
    if let Some(options) = options {
        workflow.set_options(options);
    }

    let state: ConversionState = workflow.trigger().await;
    let outcome = match &state {
        JobState::Succeeded(outcome) => outcome,
        JobState::Failed(e) => {
            writeln!(out, "error: {e}")?;
            return Ok(false);
        }
        other => {
            // A lone trigger always settles.
            writeln!(out, "error: conversion ended {}", other.label())?;
            return Ok(false);
        }
    };

    writeln!(out, "{}", outcome.output)?;
    writeln!(out)?;
    writeln!(out, "json tokens: {}", outcome.metrics.json_tokens)?;
    writeln!(out, "toon tokens: {}", outcome.metrics.toon_tokens)?;
    writeln!(out, "savings:     {}", outcome.metrics.savings_label())?;

    if let Some(clipboard) = clipboard {
        match workflow.copy_output(clipboard).await {
            Ok(()) => writeln!(out, "copied to clipboard")?,
            // Copy failures never fail the conversion.
            Err(e) => writeln!(out, "{e}")?,
        }
    }
    Ok(true)
}

pub async fn query(
    studio: &Studio,
    data: String,
    question: String,
    format: DataFormat,
    out: &mut dyn Write,
) -> anyhow::Result<bool> {
    let wf = &studio.query;
    // One-shot: no live size feedback wanted.
    wf.set_input(QueryInput {
        data_text: data,
        data_format: format,
        question,
    });

    let state: QueryState = wf.trigger().await;
    let outcome = match &state {
        JobState::Succeeded(outcome) => outcome,
        JobState::Failed(e) => {
            writeln!(out, "error: {e}")?;
            return Ok(false);
        }
        other => {
            writeln!(out, "error: query ended {}", other.label())?;
            return Ok(false);
        }
    };

    let b = &outcome.breakdown;
    writeln!(out, "{}", outcome.answer)?;
    writeln!(out)?;
    writeln!(out, "format:            {}", outcome.data_format.as_str())?;
    writeln!(out, "data tokens:       {}", b.data_tokens)?;
    writeln!(out, "question tokens:   {}", b.question_tokens)?;
    writeln!(out, "template tokens:   {}", b.template_tokens)?;
    writeln!(out, "prompt tokens:     {}", b.prompt_tokens)?;
    writeln!(out, "completion tokens: {}", b.completion_tokens)?;
    writeln!(out, "total tokens:      {}", b.total_tokens)?;
    writeln!(out, "estimated cost:    ${}", outcome.cost)?;
    if let Some(cmp) = &outcome.comparison {
        writeln!(out, "json vs toon:      {}", cmp.savings_label())?;
    }
    Ok(true)
}

/// Feeds the text through the live counter and waits for it to settle.
pub async fn count(
    studio: &Studio,
    text: String,
    timeout: Duration,
    out: &mut dyn Write,
) -> anyhow::Result<bool> {
    let counter = studio.query.token_counter();
    let mut rx = counter.subscribe();
    counter.on_text_changed(text);

    let wait = counter.window() + timeout;
    let settled = tokio::time::timeout(wait, rx.wait_for(|s| s.generation > 0 && !s.is_counting))
        .await
        .context("timed out waiting for token count")?
        .context("token counter closed")?
        .clone();

    match (settled.last_error, settled.last_accepted_count) {
        (Some(e), _) => {
            writeln!(out, "error: {e}")?;
            Ok(false)
        }
        (None, Some(n)) => {
            writeln!(out, "{n}")?;
            Ok(true)
        }
        (None, None) => {
            writeln!(out, "error: no count received")?;
            Ok(false)
        }
    }
}

fn yes_no(v: bool) -> &'static str {
    if v { "yes" } else { "no" }
}
