//! Command implementations for webcheckctl.
//!
//! Each command returns the process exit code.

use crate::client::{HtmlReport, WebcheckClient};
use crate::errors::{EXIT_SUCCESS, EXIT_USAGE, EXIT_VALIDATION_ERRORS};
use crate::render::{
    css_totals, html_totals, render_css_result, render_html_report, render_totals, BatchTotals,
};
use crate::site::site_urls;
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use webcheck_common::CssValidationResult;

fn exit_code(totals: &BatchTotals) -> i32 {
    if totals.has_errors() {
        EXIT_VALIDATION_ERRORS
    } else {
        EXIT_SUCCESS
    }
}

fn print_html(reports: &[HtmlReport]) {
    println!();
    println!("{}", "  HTML Validations".bold());
    println!();
    for report in reports {
        print!("{}", render_html_report(report));
    }
}

fn print_css(results: &[CssValidationResult]) {
    println!();
    println!("{}", "  CSS Validations".bold());
    println!();
    for result in results {
        print!("{}", render_css_result(result));
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Validate HTML of each URL, in order
pub async fn html(client: &WebcheckClient, urls: &[String], json: bool) -> Result<i32> {
    let reports = client.validate_html_batch(urls).await?;
    let totals = html_totals(&reports);

    if json {
        print_json(&reports)?;
    } else {
        print_html(&reports);
        println!();
        println!("{}", render_totals("HTML", &totals));
    }

    Ok(exit_code(&totals))
}

/// Validate CSS of each URL, in order
pub async fn css(client: &WebcheckClient, urls: &[String], json: bool) -> Result<i32> {
    let results = client.validate_css_batch(urls).await?;
    let totals = css_totals(&results);

    if json {
        print_json(&results)?;
    } else {
        print_css(&results);
        println!();
        println!("{}", render_totals("CSS", &totals));
    }

    Ok(exit_code(&totals))
}

#[derive(Serialize)]
struct SiteReport<'a> {
    html: &'a [HtmlReport],
    css: &'a [CssValidationResult],
}

/// Validate HTML then CSS for every page of a student site
pub async fn site(client: &WebcheckClient, username: &str, json: bool) -> Result<i32> {
    let urls = site_urls(username);
    if urls.is_empty() {
        eprintln!("{}", "A GitHub username is required".red());
        return Ok(EXIT_USAGE);
    }

    let reports = client.validate_html_batch(&urls).await?;
    let results = client.validate_css_batch(&urls).await?;
    let html = html_totals(&reports);
    let css = css_totals(&results);

    if json {
        print_json(&SiteReport {
            html: &reports,
            css: &results,
        })?;
    } else {
        print_html(&reports);
        print_css(&results);
        println!();
        println!("{}", render_totals("HTML", &html));
        println!("{}", render_totals("CSS", &css));
    }

    Ok(exit_code(&html.merge(css)))
}
